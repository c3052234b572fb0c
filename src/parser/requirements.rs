//! Reader and writer for pinned `requirements.txt` manifests.
//!
//! The format is deliberately narrow: one `name==version` pin per line,
//! blank lines and `#` comment lines ignored. Comments are not retained, so
//! a rewritten manifest contains only pins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::{InstalledModule, Manifest};

/// Separator between package name and pinned version.
pub const SEPARATOR: &str = "==";

/// Lines starting with this marker are skipped.
pub const COMMENT_MARKER: char = '#';

/// Errors that can occur while reading or writing a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("Manifest not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read or write the file.
    #[error("Failed to access manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-comment line is not a `name==version` pin.
    #[error("Invalid manifest line {line_number}: '{line}' (expected name==version)")]
    MissingSeparator { line_number: usize, line: String },
}

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Parses a manifest file from disk.
///
/// A missing file is reported as [`ManifestError::NotFound`], distinct from
/// other I/O failures.
pub fn parse_file(path: &Path) -> ManifestResult<Manifest> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ManifestError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManifestError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_str(&content)
}

/// Parses manifest content.
///
/// # Example
///
/// ```
/// use pyscope::parser::requirements::parse_str;
///
/// let manifest = parse_str("# pinned\nrequests==2.31.0\n\nnumpy==1.26.0\n").unwrap();
/// assert_eq!(manifest.len(), 2);
/// assert_eq!(manifest.modules[0].name, "requests");
/// ```
pub fn parse_str(content: &str) -> ManifestResult<Manifest> {
    let mut modules = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let (name, version) =
            line.split_once(SEPARATOR)
                .ok_or_else(|| ManifestError::MissingSeparator {
                    line_number: index + 1,
                    line: line.to_string(),
                })?;

        modules.push(InstalledModule::new(name.trim(), version.trim()));
    }

    Ok(Manifest::new(modules))
}

/// Renders a manifest as `name==version` lines, each newline-terminated.
pub fn render(manifest: &Manifest) -> String {
    manifest
        .modules
        .iter()
        .map(|m| format!("{}\n", m))
        .collect()
}

/// Writes a manifest to `path`, replacing any existing content.
pub fn write_file(path: &Path, manifest: &Manifest) -> ManifestResult<()> {
    fs::write(path, render(manifest)).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
