//! Parser configuration.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Default path-marker lead-ins, in trial order.
pub const DEFAULT_PREFIXES: &[&str] = &["##", "#", "file:", "path:"];

/// Grammar used to decide which lines designate a target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RecognitionStrategy {
    /// Header or tag lead-ins (`## path`, `file: path`) and bare paths.
    Prefix,
    /// A bolded filename line: `**path**:`.
    Bold,
    /// A fence whose language token is itself a filename (```` ```main.go ````).
    FenceLang,
}

/// Predicate a candidate path must satisfy to be accepted.
#[derive(Clone)]
pub struct PathValidator {
    name: &'static str,
    check: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl PathValidator {
    pub fn new(name: &'static str, check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Accepts anything containing a `/` or a `.`.
    pub fn looks_like_path() -> Self {
        Self::new("looks-like-path", |path| path.contains('/') || path.contains('.'))
    }

    /// Accepts paths whose file name ends with one of the given extensions.
    pub fn with_extensions(extensions: Vec<String>) -> Self {
        Self::new("extension", move |path| {
            let file_name = path.rsplit('/').next().unwrap_or(path);
            match file_name.rsplit_once('.') {
                Some((stem, ext)) if !stem.is_empty() => {
                    extensions.iter().any(|e| e.trim_start_matches('.') == ext)
                }
                _ => false,
            }
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn accepts(&self, path: &str) -> bool {
        (self.check)(path)
    }
}

impl fmt::Debug for PathValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Options controlling how a document is scanned.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Literal path-marker lead-ins. Listed before shorter overlapping ones.
    pub prefixes: Vec<String>,
    /// A candidate path must satisfy at least one validator. Empty accepts all.
    pub validators: Vec<PathValidator>,
    /// Drop single-line comments inside fences.
    pub strip_comments: bool,
    /// Enabled path-marker grammars.
    pub strategies: Vec<RecognitionStrategy>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            validators: vec![PathValidator::looks_like_path()],
            strip_comments: false,
            strategies: vec![RecognitionStrategy::Prefix],
        }
    }
}

impl ParserOptions {
    pub fn has_strategy(&self, strategy: RecognitionStrategy) -> bool {
        self.strategies.contains(&strategy)
    }

    /// Check a candidate against the validators.
    pub fn is_valid_path(&self, path: &str) -> bool {
        self.validators.is_empty() || self.validators.iter().any(|v| v.accepts(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ParserOptions::default();
        assert_eq!(opts.prefixes, vec!["##", "#", "file:", "path:"]);
        assert!(!opts.strip_comments);
        assert!(opts.has_strategy(RecognitionStrategy::Prefix));
        assert!(!opts.has_strategy(RecognitionStrategy::Bold));
    }

    #[test]
    fn test_default_validator() {
        let opts = ParserOptions::default();
        assert!(opts.is_valid_path("src/main"));
        assert!(opts.is_valid_path("README.md"));
        assert!(!opts.is_valid_path("Introduction"));
    }

    #[test]
    fn test_empty_validators_accept_everything() {
        let opts = ParserOptions {
            validators: vec![],
            ..Default::default()
        };
        assert!(opts.is_valid_path("Makefile"));
    }

    #[test]
    fn test_extension_validator() {
        let v = PathValidator::with_extensions(vec!["rs".to_string(), ".toml".to_string()]);
        assert!(v.accepts("src/lib.rs"));
        assert!(v.accepts("Cargo.toml"));
        assert!(!v.accepts("notes.txt"));
        assert!(!v.accepts(".rs"));
        assert!(!v.accepts("src.rs/README"));
        assert_eq!(v.name(), "extension");
    }
}
