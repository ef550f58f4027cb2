//! Input selection shared by the scanning commands.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{MdgenError, Result};
use crate::manifest::Manifest;
use crate::parser::{parse_markdown, RecognitionStrategy};
use crate::types::Block;

/// Options for reading and scanning a markdown document
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Input markdown file ("-" reads stdin)
    #[arg(long, short)]
    pub input: PathBuf,

    /// Project manifest (default: ./mdgen.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Strip comments from code blocks
    #[arg(long)]
    pub strip_comments: bool,

    /// Path-marker grammar to enable (repeatable)
    #[arg(long = "strategy", value_enum)]
    pub strategies: Vec<RecognitionStrategy>,

    /// Path-marker lead-in to recognize, longest first (repeatable)
    #[arg(long = "prefix")]
    pub prefixes: Vec<String>,
}

impl ScanArgs {
    /// Load the manifest and apply the scanning flags on top of it.
    pub fn manifest(&self) -> Result<Manifest> {
        let mut manifest = Manifest::discover(self.config.as_deref(), Path::new("."))?;

        manifest.strip_comments |= self.strip_comments;
        if !self.strategies.is_empty() {
            manifest.strategies = self.strategies.clone();
        }
        if !self.prefixes.is_empty() {
            manifest.prefixes = self.prefixes.clone();
        }

        Ok(manifest)
    }

    /// Scan the input document with the manifest's parser options.
    pub fn read_blocks(&self, manifest: &Manifest) -> Result<Vec<Block>> {
        let options = manifest.parser_options();

        if self.input == Path::new("-") {
            return parse_markdown(io::stdin().lock(), &options);
        }

        let file = File::open(&self.input).map_err(|e| MdgenError::Io {
            path: self.input.clone(),
            message: format!("Failed to open input file: {}", e),
        })?;

        parse_markdown(file, &options)
    }
}
