//! Project-wide import usage.
//!
//! Runs the walker over a directory and the extractor over every file it
//! returns. A file that cannot be read or parsed contributes nothing and is
//! logged; it never aborts the scan. Traversal failures do.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::imports::{AnalysisError, ImportExtractor};
use crate::walk::{self, ExclusionSet, WalkError};

/// Errors that abort a usage scan.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// A file that was skipped because it could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a scan found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageReport {
    /// Imported module names in file traversal order. Not deduplicated.
    pub modules: Vec<String>,
    /// Number of source files the walker returned.
    pub files_scanned: usize,
    /// Files that failed to read or parse.
    pub skipped: Vec<SkippedFile>,
}

/// Scan `directory` and return the full usage report.
pub fn collect_usage(
    directory: &Path,
    exclusions: &ExclusionSet,
) -> Result<UsageReport, UsageError> {
    let files = walk::walk(directory, exclusions)?;
    let mut extractor = ImportExtractor::new()?;
    let mut report = UsageReport {
        files_scanned: files.len(),
        ..UsageReport::default()
    };

    for path in files {
        match extractor.extract_file(&path) {
            Ok(imports) => {
                debug!(path = %path.display(), count = imports.len(), "extracted imports");
                report.modules.extend(imports.into_iter().map(|i| i.module));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                report.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Scan `directory` and return only the combined module name list.
pub fn collect(directory: &Path, exclusions: &ExclusionSet) -> Result<Vec<String>, UsageError> {
    collect_usage(directory, exclusions).map(|report| report.modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_counts_are_preserved_across_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "import os\nimport os\n");
        write(dir.path(), "b.py", "from collections import OrderedDict\n");

        let modules = collect(dir.path(), &ExclusionSet::default()).unwrap();

        assert_eq!(modules.len(), 3);
        assert_eq!(modules.iter().filter(|m| *m == "os").count(), 2);
        assert_eq!(modules.iter().filter(|m| *m == "collections").count(), 1);
    }

    #[test]
    fn test_invalid_file_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.py", "import numpy\n");
        write(dir.path(), "bad.py", "def broken(:\n");

        let report = collect_usage(dir.path(), &ExclusionSet::default()).unwrap();

        assert_eq!(report.modules, vec!["numpy"]);
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("bad.py"));
        assert!(report.skipped[0].reason.contains("Syntax error"));
    }

    #[test]
    fn test_exclusions_apply() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.py", "import requests\n");
        write(dir.path(), "venv/lib/site.py", "import pip\n");

        let exclusions = ExclusionSet::new(["venv"]).unwrap();
        let report = collect_usage(dir.path(), &exclusions).unwrap();

        assert_eq!(report.modules, vec!["requests"]);
        assert_eq!(report.files_scanned, 1);
    }

    #[test]
    fn test_deeply_nested_file_does_not_abort_scan() {
        let dir = TempDir::new().unwrap();
        let depth = 50_000;
        write(dir.path(), "good.py", "import requests\n");
        write(
            dir.path(),
            "deep.py",
            &format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth)),
        );

        let report = collect_usage(dir.path(), &ExclusionSet::default()).unwrap();

        assert_eq!(report.modules, vec!["requests"]);
        assert_eq!(report.files_scanned, 2);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let report = collect_usage(dir.path(), &ExclusionSet::default()).unwrap();

        assert!(report.modules.is_empty());
        assert_eq!(report.files_scanned, 0);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = collect(&dir.path().join("missing"), &ExclusionSet::default());

        assert!(matches!(result, Err(UsageError::Walk(_))));
    }
}
