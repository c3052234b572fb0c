//! PyScope - find the Python modules a codebase imports and prune unused pins
//!
//! This crate walks a Python source tree, extracts every imported module
//! name with tree-sitter, and reconciles the result against a pinned
//! `requirements.txt`, dropping entries nothing imports.

pub mod analysis;
pub mod config;
pub mod export;
pub mod parser;
pub mod reconcile;
pub mod walk;
