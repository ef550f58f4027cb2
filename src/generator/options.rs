//! Generator configuration.

use std::path::Path;

use glob::Pattern;

use crate::error::{MdgenError, Result};

use super::hooks::{GenerateHooks, NoopHooks};

/// Default permission bits for written files.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Default permission bits for created directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Compiled skip globs, matched against a block's base filename.
#[derive(Debug, Clone, Default)]
pub struct SkipPatterns {
    patterns: Vec<Pattern>,
}

impl SkipPatterns {
    /// Compile glob patterns, failing on the first invalid one.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| MdgenError::Config {
                    message: format!("Invalid skip pattern '{}': {}", p.as_ref(), e.msg),
                    help: Some("Use glob syntax such as '*.tmp' or 'test_*'".to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Return the first pattern matching the path's base filename.
    pub fn matching(&self, path: &str) -> Option<&str> {
        let base = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path);

        self.patterns
            .iter()
            .find(|p| p.matches(base))
            .map(|p| p.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Options controlling how blocks are written to disk.
#[derive(Debug)]
pub struct GeneratorOptions {
    /// Replace files that already exist.
    pub overwrite: bool,
    /// Permission bits for written files (Unix only).
    pub file_mode: u32,
    /// Permission bits for created directories (Unix only).
    pub dir_mode: u32,
    /// Blocks whose base filename matches are never written.
    pub skip_patterns: SkipPatterns,
    /// Report what would be written without touching the filesystem.
    pub dry_run: bool,
    /// Pre/post-process hooks.
    pub hooks: Box<dyn GenerateHooks>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            file_mode: DEFAULT_FILE_MODE,
            dir_mode: DEFAULT_DIR_MODE,
            skip_patterns: SkipPatterns::default(),
            dry_run: false,
            hooks: Box::new(NoopHooks),
        }
    }
}

impl GeneratorOptions {
    pub fn with_hooks(mut self, hooks: impl GenerateHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }
}
