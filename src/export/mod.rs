//! Output rendering for scan, file listing and purge results.
//!
//! Results go to stdout in one of two formats: plain text (one item per
//! line, easy to pipe) or JSON.

pub mod json;
pub mod text;

use std::io::{self, Write};
use std::path::PathBuf;

use crate::analysis::UsageReport;
use crate::reconcile::PurgeOutcome;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text - one entry per line
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// A result to be rendered.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    /// Imported module names from `scan`
    Modules(&'a UsageReport),
    /// Source files from `list-files`
    Files {
        files: &'a [PathBuf],
        names_only: bool,
    },
    /// Outcome of `purge`
    Purge {
        outcome: &'a PurgeOutcome,
        dry_run: bool,
    },
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(format: OutputFormat, report: &Report<'_>, writer: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => text::TextExporter.export(report, writer),
        OutputFormat::Json => json::JsonExporter.export(report, writer),
    }
}

/// File name only, falling back to the full path.
pub(crate) fn display_file(path: &std::path::Path, names_only: bool) -> String {
    if names_only {
        if let Some(name) = path.file_name() {
            return name.to_string_lossy().into_owned();
        }
    }
    path.display().to_string()
}
