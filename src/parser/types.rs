//! Shared types for manifest parsing.
//!
//! This module defines the data structures used to represent a pinned
//! Python dependency manifest (`requirements.txt`).

use serde::Serialize;
use std::fmt;

/// A single pinned package from the manifest: `name==version`.
///
/// # Example
///
/// ```
/// use pyscope::parser::types::InstalledModule;
///
/// let module = InstalledModule::new("requests", "2.31.0");
/// assert_eq!(module.to_string(), "requests==2.31.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InstalledModule {
    /// The package name, exactly as written in the manifest.
    pub name: String,

    /// The pinned version.
    pub version: String,
}

impl InstalledModule {
    /// Creates a new InstalledModule instance.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for InstalledModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, super::requirements::SEPARATOR, self.version)
    }
}

/// An ordered list of pinned packages, as persisted in the manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub modules: Vec<InstalledModule>,
}

impl Manifest {
    pub fn new(modules: Vec<InstalledModule>) -> Self {
        Self { modules }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Split into (kept, removed), preserving order, using `keep` on each entry.
    pub fn partition<F>(&self, mut keep: F) -> (Manifest, Manifest)
    where
        F: FnMut(&InstalledModule) -> bool,
    {
        let (kept, removed): (Vec<_>, Vec<_>) =
            self.modules.iter().cloned().partition(|m| keep(m));
        (Manifest::new(kept), Manifest::new(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_module_new() {
        let module = InstalledModule::new("numpy", "1.26.0");
        assert_eq!(module.name, "numpy");
        assert_eq!(module.version, "1.26.0");
    }

    #[test]
    fn test_installed_module_display() {
        let module = InstalledModule::new("flask", "3.0.0");
        assert_eq!(format!("{}", module), "flask==3.0.0");
    }

    #[test]
    fn test_manifest_default() {
        let manifest = Manifest::default();
        assert!(manifest.is_empty());
        assert_eq!(manifest.len(), 0);
    }

    #[test]
    fn test_manifest_partition_keeps_order() {
        let manifest = Manifest::new(vec![
            InstalledModule::new("a", "1"),
            InstalledModule::new("b", "2"),
            InstalledModule::new("c", "3"),
        ]);

        let (kept, removed) = manifest.partition(|m| m.name != "b");

        assert_eq!(kept.modules, vec![InstalledModule::new("a", "1"), InstalledModule::new("c", "3")]);
        assert_eq!(removed.modules, vec![InstalledModule::new("b", "2")]);
    }
}
