//! Content hooks applied around each file write.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::error::{MdgenError, Result};

/// Transforms applied before and after a block is written.
///
/// Both methods have pass-through defaults, so an implementation only
/// overrides the stage it cares about.
pub trait GenerateHooks: fmt::Debug {
    /// Transform block content before it is written.
    fn pre_process<'a>(&self, content: &'a str, _language: &str) -> Cow<'a, str> {
        Cow::Borrowed(content)
    }

    /// Run after a file has been written. An error aborts the run.
    fn post_process(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Hooks that leave content untouched and do nothing after writing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl GenerateHooks for NoopHooks {}

/// Runs an external command on every written file.
///
/// The file path is appended as the last argument, e.g. `gofmt -w <path>`.
#[derive(Debug, Clone)]
pub struct CommandHook {
    program: String,
    args: Vec<String>,
}

impl CommandHook {
    /// Parse a whitespace-separated command line.
    pub fn parse(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(|s| s.to_string());
        let program = parts.next().ok_or_else(|| MdgenError::Config {
            message: "Post-process command is empty".to_string(),
            help: Some("Pass a command such as 'gofmt -w'".to_string()),
        })?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl GenerateHooks for CommandHook {
    fn post_process(&self, path: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| MdgenError::Hook {
                path: path.to_path_buf(),
                message: format!("failed to run '{}': {}", self.program, e),
            })?;

        if !status.success() {
            return Err(MdgenError::Hook {
                path: path.to_path_buf(),
                message: format!("'{}' exited with {}", self.program, status),
            });
        }

        Ok(())
    }
}
