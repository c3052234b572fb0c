use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use pyscope::analysis;
use pyscope::config::{ScanOptions, DEFAULT_MANIFEST};
use pyscope::export::{self, OutputFormat, Report};
use pyscope::reconcile;
use pyscope::walk::{self, ExclusionSet};

#[derive(Parser)]
#[command(name = "pyscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Find the Python modules a codebase imports and prune unused pins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Args)]
struct ScanArgs {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Extra glob patterns to exclude, on top of `venv`
    exclude: Vec<String>,

    /// Do not exclude `venv` by default
    #[arg(long)]
    no_default_excludes: bool,
}

impl ScanArgs {
    fn options(&self) -> ScanOptions {
        if self.no_default_excludes {
            ScanOptions::without_defaults(&self.directory, &self.exclude)
        } else {
            ScanOptions::new(&self.directory, &self.exclude)
        }
    }

    fn exclusions(&self) -> anyhow::Result<(ScanOptions, ExclusionSet)> {
        let options = self.options();
        let exclusions = options.exclusions()?;
        debug!(root = %options.root.display(), exclude = ?options.exclude, "scan options");
        Ok((options, exclusions))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print every module imported under a directory (duplicates included)
    Scan(ScanArgs),

    /// Remove manifest pins that nothing under a directory imports
    Purge {
        #[command(flatten)]
        scan: ScanArgs,

        /// Manifest to reconcile (relative to the current directory)
        #[arg(long, env = "PYSCOPE_MANIFEST", default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Show what would be removed without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the source files a scan would analyze
    ListFiles {
        #[command(flatten)]
        scan: ScanArgs,

        /// Print file names instead of full paths
        #[arg(long)]
        names_only: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Scan(args) => {
            let (options, exclusions) = args.exclusions()?;
            let usage = analysis::collect_usage(&options.root, &exclusions)
                .with_context(|| format!("Failed to scan {}", options.root.display()))?;
            export::export(cli.format, &Report::Modules(&usage), &mut out)?;
        }
        Commands::Purge {
            scan,
            manifest,
            dry_run,
        } => {
            let (options, exclusions) = scan.exclusions()?;
            let outcome = if *dry_run {
                reconcile::plan(&options.root, &exclusions, manifest)
            } else {
                reconcile::purge(&options.root, &exclusions, manifest)
            }
            .with_context(|| format!("Failed to purge {}", manifest.display()))?;
            export::export(
                cli.format,
                &Report::Purge {
                    outcome: &outcome,
                    dry_run: *dry_run,
                },
                &mut out,
            )?;
        }
        Commands::ListFiles { scan, names_only } => {
            let (options, exclusions) = scan.exclusions()?;
            let files = walk::walk(&options.root, &exclusions)
                .with_context(|| format!("Failed to list {}", options.root.display()))?;
            export::export(
                cli.format,
                &Report::Files {
                    files: &files,
                    names_only: *names_only,
                },
                &mut out,
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
