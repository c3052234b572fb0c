//! JSON export implementation.
//!
//! Exports results in JSON format for machine-readable output.

use super::{display_file, Exporter, Report};
use crate::analysis::SkippedFile;
use crate::parser::InstalledModule;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable file listing for JSON output.
#[derive(Serialize)]
struct JsonFiles {
    count: usize,
    files: Vec<String>,
}

/// Serializable purge result for JSON output.
#[derive(Serialize)]
struct JsonPurge<'a> {
    dry_run: bool,
    kept: &'a [InstalledModule],
    removed: &'a [InstalledModule],
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<&'a PathBuf>,
    files_scanned: usize,
    #[serde(skip_serializing_if = "no_skipped_files")]
    skipped: &'a [SkippedFile],
}

fn no_skipped_files(skipped: &&[SkippedFile]) -> bool {
    skipped.is_empty()
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> io::Result<()> {
        let json = match report {
            Report::Modules(usage) => serde_json::to_string_pretty(usage),
            Report::Files { files, names_only } => serde_json::to_string_pretty(&JsonFiles {
                count: files.len(),
                files: files.iter().map(|f| display_file(f, *names_only)).collect(),
            }),
            Report::Purge { outcome, dry_run } => serde_json::to_string_pretty(&JsonPurge {
                dry_run: *dry_run,
                kept: &outcome.kept.modules,
                removed: &outcome.removed.modules,
                backup: outcome.backup.as_ref(),
                files_scanned: outcome.usage.files_scanned,
                skipped: &outcome.usage.skipped,
            }),
        }
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::UsageReport;
    use crate::parser::Manifest;
    use crate::reconcile::PurgeOutcome;

    fn render(report: &Report<'_>) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(report, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_modules() {
        let usage = UsageReport {
            modules: vec!["os".into(), "os".into()],
            files_scanned: 2,
            skipped: vec![SkippedFile {
                path: PathBuf::from("bad.py"),
                reason: "Syntax error".into(),
            }],
        };

        let parsed = render(&Report::Modules(&usage));

        assert_eq!(parsed["modules"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["files_scanned"], 2);
        assert_eq!(parsed["skipped"][0]["path"], "bad.py");
        assert_eq!(parsed["skipped"][0]["reason"], "Syntax error");
    }

    #[test]
    fn test_json_files() {
        let files = vec![PathBuf::from("pkg").join("a.py")];
        let parsed = render(&Report::Files {
            files: &files,
            names_only: true,
        });

        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["files"][0], "a.py");
    }

    #[test]
    fn test_json_purge() {
        let outcome = PurgeOutcome {
            kept: Manifest::new(vec![InstalledModule::new("numpy", "1.26.0")]),
            removed: Manifest::new(vec![InstalledModule::new("requests", "2.31.0")]),
            usage: UsageReport::default(),
            backup: None,
        };

        let parsed = render(&Report::Purge {
            outcome: &outcome,
            dry_run: true,
        });

        assert_eq!(parsed["dry_run"], true);
        assert_eq!(parsed["kept"][0]["name"], "numpy");
        assert_eq!(parsed["removed"][0]["version"], "2.31.0");
        assert!(parsed.get("backup").is_none());
        assert!(parsed.get("skipped").is_none());
    }
}
