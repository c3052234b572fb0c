//! Parser module for PyScope.
//!
//! This module reads and writes the pinned dependency manifest that a scan
//! is reconciled against.
//!
//! # Supported Formats
//!
//! - **requirements.txt** with `name==version` pins - Fully supported
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pyscope::parser::requirements;
//!
//! let manifest = requirements::parse_file(Path::new("requirements.txt"))?;
//! for module in &manifest.modules {
//!     println!("{} pinned at {}", module.name, module.version);
//! }
//! ```

pub mod requirements;
pub mod types;

// Re-export commonly used types for convenience
pub use requirements::{parse_file, parse_str, render, write_file, ManifestError, ManifestResult};

pub use types::{InstalledModule, Manifest};
