//! Source tree discovery for PyScope.
//!
//! This module finds the Python files a scan should look at. It is split in
//! two parts:
//!
//! - [`filter`] decides whether a single path matches any exclusion pattern
//! - [`walker`] walks a directory tree, pruning excluded directories before
//!   descending and keeping only `.py` files
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pyscope::walk::{walk, ExclusionSet};
//!
//! let exclusions = ExclusionSet::new(["venv", "build"])?;
//! for file in walk(Path::new("."), &exclusions)? {
//!     println!("{}", file.display());
//! }
//! ```

pub mod filter;
pub mod walker;

use std::path::PathBuf;

use thiserror::Error;

pub use filter::{matches, ExclusionPattern, ExclusionSet};
pub use walker::{walk, SOURCE_SUFFIX};

/// Errors that can occur while walking a source tree.
#[derive(Error, Debug)]
pub enum WalkError {
    /// A directory (or the root itself) could not be read. Aborts the walk.
    #[error("Failed to traverse {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// An exclusion pattern is not valid glob syntax.
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Result type for walk operations.
pub type WalkResult<T> = Result<T, WalkError>;
