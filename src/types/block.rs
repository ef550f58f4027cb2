//! File block type.
//!
//! A block pairs a target path with the content of one fenced code block.

use serde::Serialize;

/// A file definition extracted from a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Relative, lexically cleaned target path.
    pub path: String,
    /// Fence content, trimmed, ending with exactly one newline.
    pub content: String,
    /// Language token from the opening fence (may be empty).
    pub language: String,
}

impl Block {
    /// Create a block, normalizing the content's surrounding whitespace.
    ///
    /// Leading and trailing whitespace is trimmed and a single trailing
    /// newline is appended.
    pub fn new(path: impl Into<String>, content: &str, language: impl Into<String>) -> Self {
        let mut normalized = content.trim().to_string();
        normalized.push('\n');

        Self {
            path: path.into(),
            content: normalized,
            language: language.into(),
        }
    }

    /// Number of content lines.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}
