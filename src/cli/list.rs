//! List command implementation.
//!
//! Scans a document and prints the file blocks it defines without writing
//! anything.

use clap::{Args, ValueEnum};

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::Block;

use super::input::ScanArgs;

/// Output format for the block listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    /// Human-readable status lines on stderr
    #[default]
    Text,
    /// JSON array on stdout
    Json,
}

/// List the file blocks found in a markdown document
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let manifest = args.scan.manifest()?;
    let blocks = args.scan.read_blocks(&manifest)?;

    match args.format {
        ListFormat::Json => println!("{}", render_json(&blocks)?),
        ListFormat::Text => print_blocks(&blocks, printer),
    }

    Ok(())
}

/// Render blocks as a pretty-printed JSON array.
pub fn render_json(blocks: &[Block]) -> Result<String> {
    Ok(serde_json::to_string_pretty(blocks)?)
}

fn print_blocks(blocks: &[Block], printer: &Printer) {
    for block in blocks {
        let language = if block.language.is_empty() {
            "text"
        } else {
            block.language.as_str()
        };
        let detail = format!("({}, {})", language, plural(block.line_count(), "line", "lines"));
        printer.info("Found", &format!("{} {}", block.path, printer.dim(&detail)));
    }

    printer.info("Total", &plural(blocks.len(), "block", "blocks"));
}
