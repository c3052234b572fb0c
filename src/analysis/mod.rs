//! Source code analysis module for PyScope.
//!
//! This module finds which modules a Python project imports.
//!
//! # Features
//!
//! - Parse `import a.b.c` and `import a as b` statements
//! - Parse `from a import b`, relative and `__future__` imports
//! - Find imports nested in functions, classes and conditionals
//! - Aggregate imports over a whole source tree, skipping unparsable files
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pyscope::analysis::{collect_usage, ImportExtractor};
//! use pyscope::walk::ExclusionSet;
//!
//! // Analyze a single file
//! let mut extractor = ImportExtractor::new()?;
//! for import in extractor.extract_file(Path::new("app/main.py"))? {
//!     println!("{} (line {})", import.module, import.line);
//! }
//!
//! // Analyze an entire project
//! let report = collect_usage(Path::new("."), &ExclusionSet::new(["venv"])?)?;
//! println!("{} imports in {} files", report.modules.len(), report.files_scanned);
//! ```

pub mod imports;
pub mod usage;

// Re-export main types for convenience
pub use imports::{extract, AnalysisError, AnalysisResult, Import, ImportExtractor, ImportKind};
pub use usage::{collect, collect_usage, SkippedFile, UsageError, UsageReport};
