//! Markdown scanning for embedded file definitions.
//!
//! A document names target files with path markers and follows each marker
//! with a fenced code block holding the file content:
//!
//! ````markdown
//! ## src/main.go
//!
//! ```go
//! package main
//! ```
//! ````
//!
//! Scanning is a single pass over the document lines. Malformed or
//! unmatched markdown never fails; it simply yields no block. Only a read
//! failure on the input is reported as an error.
//!
//! # Usage
//!
//! ```ignore
//! use mdgen::parser::{parse_markdown, ParserOptions};
//!
//! let file = std::fs::File::open("scaffold.md")?;
//! let blocks = parse_markdown(file, &ParserOptions::default())?;
//!
//! for block in blocks {
//!     println!("{} ({} lines)", block.path, block.line_count());
//! }
//! ```

mod comments;
mod options;
mod path;
mod scanner;

use std::io::{BufRead, BufReader, Read};

use crate::error::{MdgenError, Result};
use crate::types::Block;

pub use comments::{comment_token, is_comment_line};
pub use options::{ParserOptions, PathValidator, RecognitionStrategy, DEFAULT_PREFIXES};
pub use path::PathRecognizer;
pub use scanner::{FenceState, Scanner, FENCE};

/// Scan a markdown stream into an ordered list of blocks.
pub fn parse_markdown<R: Read>(reader: R, options: &ParserOptions) -> Result<Vec<Block>> {
    let recognizer = PathRecognizer::new(options)?;
    let mut scanner = Scanner::new(&recognizer);
    let mut blocks = Vec::new();

    for line in BufReader::new(reader).lines() {
        let line = line.map_err(|e| MdgenError::Scan {
            message: format!("error scanning markdown: {}", e),
        })?;
        blocks.extend(scanner.step(&line));
    }

    blocks.extend(scanner.finish());
    Ok(blocks)
}

/// Scan an in-memory markdown document.
pub fn parse_str(source: &str, options: &ParserOptions) -> Result<Vec<Block>> {
    parse_markdown(source.as_bytes(), options)
}
