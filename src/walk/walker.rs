//! Recursive discovery of Python source files.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::{ExclusionSet, WalkError, WalkResult};

/// File name suffix of the files a scan analyzes.
pub const SOURCE_SUFFIX: &str = ".py";

/// Walk `root` and return every `.py` file that is not excluded.
///
/// Each entry below the root is tested against `exclusions` using its path
/// relative to `root`. Excluded directories are pruned before descending, so
/// nothing beneath them is returned even if the file itself would not match.
/// The root itself is never tested.
///
/// Paths are returned in traversal order, not sorted. An unreadable directory
/// fails the whole walk.
pub fn walk(root: &Path, exclusions: &ExclusionSet) -> WalkResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    let entries = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if exclusions.matches(relative) {
            debug!(path = %entry.path().display(), "excluded");
            return false;
        }
        true
    });

    for entry in entries {
        let entry = entry.map_err(|source| WalkError::Traversal {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        if !is_source_file(&entry) {
            continue;
        }

        files.push(entry.into_path());
    }

    debug!(root = %root.display(), count = files.len(), "walk finished");
    Ok(files)
}

/// Regular files (or symlinks to them) whose name ends in `.py`.
fn is_source_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
    is_file && entry.file_name().to_string_lossy().ends_with(SOURCE_SUFFIX)
}
