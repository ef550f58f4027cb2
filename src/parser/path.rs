//! Path-marker recognition.
//!
//! Decides whether a line outside a fence names the file for the next
//! fenced block. Three grammars are supported and can be enabled
//! independently:
//!
//! - lead-in markers such as `## src/main.rs` or `file: src/main.rs`
//! - bolded filenames such as `**src/main.rs**:`
//! - fences whose language token is a filename, such as ```` ```main.go ````

use regex::Regex;

use crate::error::{MdgenError, Result};
use crate::types::clean_path;

use super::options::{ParserOptions, RecognitionStrategy};

/// Recognizes path markers according to a set of parser options.
#[derive(Debug, Clone)]
pub struct PathRecognizer {
    options: ParserOptions,
    prefix: Option<Regex>,
    bold: Regex,
}

impl PathRecognizer {
    /// Build a recognizer, compiling the lead-ins into one anchored pattern.
    pub fn new(options: &ParserOptions) -> Result<Self> {
        let alternatives: Vec<String> = options
            .prefixes
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| regex::escape(p.trim()))
            .collect();

        let prefix = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(r"^(?:{})\s*", alternatives.join("|"));
            Some(Regex::new(&pattern).map_err(|e| MdgenError::Config {
                message: format!("Invalid path prefixes: {}", e),
                help: Some("Use shorter literal prefixes such as '##' or 'file:'".to_string()),
            })?)
        };

        let bold = Regex::new(r"^\*\*([^*]+)\*\*:?$").map_err(|e| MdgenError::Config {
            message: format!("Invalid bold filename pattern: {}", e),
            help: None,
        })?;

        Ok(Self {
            options: options.clone(),
            prefix,
            bold,
        })
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Extract a cleaned path from a line outside a fence.
    ///
    /// Returns `None` when the line is ordinary prose.
    pub fn recognize(&self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        if self.options.has_strategy(RecognitionStrategy::Bold) {
            if let Some(caps) = self.bold.captures(trimmed) {
                return self.accept(caps[1].trim());
            }
        }

        if self.options.has_strategy(RecognitionStrategy::Prefix) {
            return self.accept(self.strip_prefix(trimmed));
        }

        None
    }

    /// Interpret a fence language token as a filename.
    ///
    /// Returns the cleaned path and the effective language (the file
    /// extension) when the fence-language grammar is enabled and the token
    /// looks like a dotted filename.
    pub fn fence_path(&self, token: &str) -> Option<(String, String)> {
        if !self.options.has_strategy(RecognitionStrategy::FenceLang) {
            return None;
        }

        let file_name = token.rsplit('/').next().unwrap_or(token);
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }

        let path = self.accept(token)?;
        Some((path, ext.to_string()))
    }

    /// Remove the first matching lead-in and surrounding whitespace.
    fn strip_prefix<'a>(&self, line: &'a str) -> &'a str {
        match self.prefix.as_ref().and_then(|re| re.find(line)) {
            Some(m) => line[m.end()..].trim(),
            None => line,
        }
    }

    fn accept(&self, candidate: &str) -> Option<String> {
        if candidate.is_empty() || !self.options.is_valid_path(candidate) {
            return None;
        }
        let cleaned = clean_path(candidate);
        if cleaned.is_empty() {
            return None;
        }
        Some(cleaned)
    }
}
