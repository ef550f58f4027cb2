//! Line-oriented block scanner.
//!
//! The scanner is an explicit state machine: a fence state plus the current
//! path and content buffer. Each call to [`Scanner::step`] consumes one line
//! and may complete a block; [`Scanner::finish`] flushes whatever is left at
//! end of input.

use tracing::{debug, info};

use crate::types::{safe_relative_path, Block};

use super::comments::is_comment_line;
use super::path::PathRecognizer;

/// Fence marker opening and closing a code block.
pub const FENCE: &str = "```";

/// Whether the scanner is inside a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FenceState {
    #[default]
    Outside,
    Inside {
        /// Language token of the opening fence (may be empty).
        language: String,
    },
}

/// Scanner state threaded through a document one line at a time.
#[derive(Debug)]
pub struct Scanner<'a> {
    recognizer: &'a PathRecognizer,
    state: FenceState,
    current_path: Option<String>,
    content: String,
    line_number: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(recognizer: &'a PathRecognizer) -> Self {
        Self {
            recognizer,
            state: FenceState::Outside,
            current_path: None,
            content: String::new(),
            line_number: 0,
        }
    }

    pub fn state(&self) -> &FenceState {
        &self.state
    }

    /// The path the next fenced block will be written to, if any.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// Consume one line, returning a block if it completes one.
    pub fn step(&mut self, line: &str) -> Option<Block> {
        self.line_number += 1;
        let trimmed = line.trim();

        match std::mem::take(&mut self.state) {
            FenceState::Outside => {
                if let Some(rest) = trimmed.strip_prefix(FENCE) {
                    self.open_fence(rest);
                    None
                } else {
                    self.state = FenceState::Outside;
                    self.recognize_marker(trimmed);
                    None
                }
            }
            FenceState::Inside { language } => {
                if trimmed.starts_with(FENCE) {
                    self.close_fence(&language)
                } else {
                    self.push_content(line, &language);
                    self.state = FenceState::Inside { language };
                    None
                }
            }
        }
    }

    /// Flush the final block at end of input.
    ///
    /// Covers a document that ends inside an unterminated fence.
    pub fn finish(mut self) -> Option<Block> {
        let language = match std::mem::take(&mut self.state) {
            FenceState::Inside { language } => language,
            FenceState::Outside => String::new(),
        };
        self.flush(&language)
    }

    fn open_fence(&mut self, rest: &str) {
        let token = rest.split_whitespace().next().unwrap_or("");

        let language = match self.recognizer.fence_path(token) {
            Some((path, language)) => {
                self.adopt_path(path);
                language
            }
            None => token.to_string(),
        };

        self.state = FenceState::Inside { language };
    }

    fn close_fence(&mut self, language: &str) -> Option<Block> {
        let block = self.flush(language);
        if block.is_none() && !self.content.trim().is_empty() {
            debug!(
                line = self.line_number,
                "fenced block has no target path, ignoring"
            );
        }
        self.content.clear();
        self.state = FenceState::Outside;
        block
    }

    fn recognize_marker(&mut self, trimmed: &str) {
        if trimmed.is_empty() {
            return;
        }
        if let Some(path) = self.recognizer.recognize(trimmed) {
            self.adopt_path(path);
        }
    }

    /// Make `path` current, replacing any path still waiting for a fence.
    ///
    /// Only called outside a fence, where the content buffer is always empty
    /// because closing a fence clears it.
    fn adopt_path(&mut self, path: String) {
        debug_assert!(self.content.is_empty());
        if let Some(previous) = &self.current_path {
            debug!(previous = %previous, next = %path, "path marker superseded without content");
        }
        self.current_path = Some(path);
    }

    fn push_content(&mut self, line: &str, language: &str) {
        if line.trim().is_empty() {
            return;
        }
        if self.recognizer.options().strip_comments && is_comment_line(line, language) {
            return;
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    /// Emit a block for the current path and buffered content, if both exist.
    ///
    /// A successful flush consumes the current path.
    fn flush(&mut self, language: &str) -> Option<Block> {
        if self.current_path.is_none() || self.content.trim().is_empty() {
            return None;
        }

        let raw_path = self.current_path.take()?;
        let content = std::mem::take(&mut self.content);

        match safe_relative_path(&raw_path) {
            Some(path) => {
                debug!(path = %path, line = self.line_number, "found block");
                Some(Block::new(path, &content, language))
            }
            None => {
                info!(path = %raw_path, "dropping block with unsafe path");
                None
            }
        }
    }
}
