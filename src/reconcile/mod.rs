//! Manifest reconciliation.
//!
//! Compares the pins in a manifest against the modules a project actually
//! imports and rewrites the manifest without the unused ones.
//!
//! Name matching is exact: a pin is kept only if its name appears verbatim
//! among the imported module names. Packages whose distribution name differs
//! from their import name (`beautifulsoup4` vs `bs4`, `PyYAML` vs `yaml`) are
//! therefore removed, as are pins that are only imported as dotted paths
//! (`import google.protobuf` does not keep `google`).
//!
//! The rewrite renames the manifest to `<manifest>.bak` and then writes the
//! filtered pins to the original path. If the process dies between the two
//! steps the manifest is briefly absent but recoverable from the backup.

mod lock;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::analysis::{self, UsageError, UsageReport};
use crate::config;
use crate::parser::{self, InstalledModule, Manifest, ManifestError};
use crate::walk::ExclusionSet;

pub use lock::ManifestLock;

/// Errors that can occur during a purge.
#[derive(Error, Debug)]
pub enum PurgeError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Manifest {path} is locked by another purge")]
    Locked { path: PathBuf },

    #[error("Failed to lock {path}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to back up {from} to {to}: {source}")]
    Backup {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of reconciling a manifest against a scan.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeOutcome {
    /// Pins whose name was imported, in manifest order.
    pub kept: Manifest,
    /// Pins whose name was never imported, in manifest order.
    pub removed: Manifest,
    /// The scan the decision was based on.
    pub usage: UsageReport,
    /// Where the previous manifest was saved. `None` when nothing was written.
    pub backup: Option<PathBuf>,
}

/// Split `manifest` into pins that appear in `modules` and pins that don't.
pub fn reconcile(manifest: &Manifest, modules: &[String]) -> (Manifest, Manifest) {
    let used: HashSet<&str> = modules.iter().map(String::as_str).collect();
    manifest.partition(|m: &InstalledModule| used.contains(m.name.as_str()))
}

/// Read the manifest, scan `directory` and compute the purge without
/// touching the filesystem.
pub fn plan(
    directory: &Path,
    exclusions: &ExclusionSet,
    manifest_path: &Path,
) -> Result<PurgeOutcome, PurgeError> {
    let manifest = parser::parse_file(manifest_path)?;
    let usage = analysis::collect_usage(directory, exclusions)?;
    let (kept, removed) = reconcile(&manifest, &usage.modules);

    Ok(PurgeOutcome {
        kept,
        removed,
        usage,
        backup: None,
    })
}

/// Remove every pin from `manifest_path` that `directory` does not import.
///
/// Holds an advisory lock on the manifest for the whole run. The previous
/// manifest is left at `<manifest>.bak`, overwriting any older backup.
pub fn purge(
    directory: &Path,
    exclusions: &ExclusionSet,
    manifest_path: &Path,
) -> Result<PurgeOutcome, PurgeError> {
    let _lock = ManifestLock::acquire(manifest_path)?;

    let mut outcome = plan(directory, exclusions, manifest_path)?;
    let backup = replace_manifest(manifest_path, &outcome.kept)?;

    info!(
        manifest = %manifest_path.display(),
        kept = outcome.kept.len(),
        removed = outcome.removed.len(),
        "manifest purged"
    );

    outcome.backup = Some(backup);
    Ok(outcome)
}

/// Move the current manifest to its backup path and write `kept` in its place.
fn replace_manifest(manifest_path: &Path, kept: &Manifest) -> Result<PathBuf, PurgeError> {
    let backup = config::backup_path(manifest_path);

    fs::rename(manifest_path, &backup).map_err(|source| PurgeError::Backup {
        from: manifest_path.to_path_buf(),
        to: backup.clone(),
        source,
    })?;

    parser::write_file(manifest_path, kept)?;
    Ok(backup)
}
