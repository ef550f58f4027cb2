//! Generate command implementation.
//!
//! Scans a markdown document and writes each file block under the output
//! directory.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::generator::{generate_files, BlockOutcome, CommandHook, GenerateReport};
use crate::output::{display_path, plural, Printer};

use super::input::ScanArgs;

/// Generate files and directories from a markdown document
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output directory [default: manifest output, or ./tmp]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(long, short)]
    pub force: bool,

    /// Patterns of files to skip, e.g. "*.tmp" (repeatable)
    #[arg(long)]
    pub skip: Vec<String>,

    /// Command to run on each written file, e.g. "gofmt -w"
    #[arg(long)]
    pub post_cmd: Option<String>,

    /// Show what would be written without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let mut manifest = args.scan.manifest()?;
    manifest.overwrite |= args.force;
    manifest.skip.extend(args.skip.iter().cloned());

    let output = args.output.clone().unwrap_or_else(|| manifest.output.clone());

    let mut options = manifest.generator_options()?;
    options.dry_run = args.dry_run;
    if let Some(command) = &args.post_cmd {
        options = options.with_hooks(CommandHook::parse(command)?);
    }

    printer.status("Scanning", &args.scan.input.display().to_string());
    let blocks = args.scan.read_blocks(&manifest)?;

    let report = generate_files(&blocks, &output, &options)?;
    print_report(&report, args.dry_run, printer);

    let verb = if args.dry_run { "Checked" } else { "Finished" };
    printer.status(
        verb,
        &format!(
            "{} in {}",
            plural(report.written_count(), "file", "files"),
            display_path(&output)
        ),
    );

    Ok(())
}

fn print_report(report: &GenerateReport, dry_run: bool, printer: &Printer) {
    let verb = if dry_run { "Would write" } else { "Writing" };
    for outcome in &report.outcomes {
        match outcome {
            BlockOutcome::Written(path) => printer.status(verb, &display_path(path)),
            BlockOutcome::Skipped(skipped) => printer.warning(
                "Skipping",
                &format!("{} {}", skipped.path, printer.dim(&format!("({})", skipped.reason))),
            ),
        }
    }
}
