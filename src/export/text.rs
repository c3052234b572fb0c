//! Plain text export implementation.

use super::{display_file, Exporter, Report};
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, report: &Report<'_>, writer: &mut W) -> io::Result<()> {
        match report {
            Report::Modules(usage) => {
                for module in &usage.modules {
                    writeln!(writer, "{}", module)?;
                }
            }
            Report::Files { files, names_only } => {
                for file in files.iter() {
                    writeln!(writer, "{}", display_file(file, *names_only))?;
                }
            }
            Report::Purge { outcome, dry_run } => {
                for module in &outcome.removed.modules {
                    writeln!(writer, "- {}", module)?;
                }
                for module in &outcome.kept.modules {
                    writeln!(writer, "  {}", module)?;
                }

                let total = outcome.kept.len() + outcome.removed.len();
                if *dry_run {
                    writeln!(
                        writer,
                        "Would remove {} of {} pins (dry run)",
                        outcome.removed.len(),
                        total
                    )?;
                } else {
                    write!(writer, "Removed {} of {} pins", outcome.removed.len(), total)?;
                    if let Some(backup) = &outcome.backup {
                        write!(writer, " (backup: {})", backup.display())?;
                    }
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}
