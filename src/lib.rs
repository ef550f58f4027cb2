//! mdgen - Generate project files from markdown
//!
//! A library for expanding markdown documents that embed file definitions
//! (a path marker followed by a fenced code block) into a directory tree.

pub mod cli;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod output;
pub mod parser;
pub mod types;

pub use error::{MdgenError, Result};
pub use generator::{
    generate_files, BlockOutcome, CommandHook, GenerateHooks, GenerateReport, GeneratorOptions,
    NoopHooks, SkipPatterns, SkipReason,
};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use parser::{
    parse_markdown, parse_str, ParserOptions, PathRecognizer, PathValidator, RecognitionStrategy,
    Scanner,
};
pub use types::{clean_path, safe_relative_path, Block};
