//! Defaults and option types shared by the library and the CLI.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::walk::{ExclusionSet, WalkResult};

/// Patterns excluded from every scan unless explicitly disabled.
pub const DEFAULT_EXCLUDES: &[&str] = &["venv"];

/// Manifest file name, resolved against the current directory by the CLI.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Appended to the manifest file name to form the backup path.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Appended to the manifest file name to form the advisory lock path.
pub const LOCK_SUFFIX: &str = ".lock";

/// What to scan and what to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub exclude: Vec<String>,
}

impl ScanOptions {
    /// Scan `root` with the default exclusions followed by `extra`.
    pub fn new(root: impl Into<PathBuf>, extra: &[String]) -> Self {
        let mut exclude: Vec<String> = DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect();
        exclude.extend(extra.iter().cloned());
        Self {
            root: root.into(),
            exclude,
        }
    }

    /// Scan `root` with only the given patterns.
    pub fn without_defaults(root: impl Into<PathBuf>, exclude: &[String]) -> Self {
        Self {
            root: root.into(),
            exclude: exclude.to_vec(),
        }
    }

    /// Compile the exclusion patterns.
    pub fn exclusions(&self) -> WalkResult<ExclusionSet> {
        ExclusionSet::new(&self.exclude)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(".", &[])
    }
}

/// `requirements.txt` -> `requirements.txt.bak`
pub fn backup_path(manifest: &Path) -> PathBuf {
    with_suffix(manifest, BACKUP_SUFFIX)
}

/// `requirements.txt` -> `requirements.txt.lock`
pub fn lock_path(manifest: &Path) -> PathBuf {
    with_suffix(manifest, LOCK_SUFFIX)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from(DEFAULT_MANIFEST));
    name.push(suffix);
    path.with_file_name(name)
}
