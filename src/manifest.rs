//! Project manifest (mdgen.yaml) parsing.
//!
//! The manifest holds defaults for a project: where to write files, which
//! path markers to recognize and which files to skip. Command-line flags
//! take precedence over manifest values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdgenError, Result};
use crate::generator::{GeneratorOptions, SkipPatterns, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
use crate::parser::{ParserOptions, PathValidator, RecognitionStrategy, DEFAULT_PREFIXES};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "mdgen.yaml";

/// Project manifest loaded from mdgen.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Output directory for generated files.
    pub output: PathBuf,

    /// Replace files that already exist.
    pub overwrite: bool,

    /// Drop single-line comments from fenced content.
    pub strip_comments: bool,

    /// Path-marker lead-ins, longest first.
    pub prefixes: Vec<String>,

    /// Enabled path-marker grammars.
    pub strategies: Vec<RecognitionStrategy>,

    /// Only accept paths with these extensions (empty accepts any path-like text).
    pub extensions: Vec<String>,

    /// Glob patterns matched against base filenames to skip.
    pub skip: Vec<String>,

    /// Permission bits for written files, e.g. `0o644` or `420`.
    pub file_mode: u32,

    /// Permission bits for created directories.
    pub dir_mode: u32,
}

fn default_output() -> PathBuf {
    PathBuf::from("tmp")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output: default_output(),
            overwrite: false,
            strip_comments: false,
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            strategies: vec![RecognitionStrategy::Prefix],
            extensions: vec![],
            skip: vec![],
            file_mode: DEFAULT_FILE_MODE,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

impl Manifest {
    /// Load manifest from an mdgen.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MdgenError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load an explicit manifest, or `mdgen.yaml` from `dir` if present.
    ///
    /// Falls back to defaults when no manifest exists.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(MANIFEST_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| MdgenError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Parser options described by this manifest.
    pub fn parser_options(&self) -> ParserOptions {
        let validators = if self.extensions.is_empty() {
            vec![PathValidator::looks_like_path()]
        } else {
            vec![PathValidator::with_extensions(self.extensions.clone())]
        };

        let strategies = if self.strategies.is_empty() {
            vec![RecognitionStrategy::Prefix]
        } else {
            self.strategies.clone()
        };

        ParserOptions {
            prefixes: self.prefixes.clone(),
            validators,
            strip_comments: self.strip_comments,
            strategies,
        }
    }

    /// Generator options described by this manifest.
    pub fn generator_options(&self) -> Result<GeneratorOptions> {
        Ok(GeneratorOptions {
            overwrite: self.overwrite,
            file_mode: self.file_mode,
            dir_mode: self.dir_mode,
            skip_patterns: SkipPatterns::new(self.skip.as_slice())?,
            ..Default::default()
        })
    }

    /// Render a commented manifest with default values.
    pub fn template() -> String {
        let defaults = Self::default();
        let prefixes: Vec<String> = defaults
            .prefixes
            .iter()
            .map(|p| format!("\"{}\"", p))
            .collect();

        format!(
            "# mdgen project configuration\n\
             output: {}\n\
             overwrite: false\n\
             strip_comments: false\n\
             # Path-marker lead-ins, longest first\n\
             prefixes: [{}]\n\
             # prefix, bold, fence-lang\n\
             strategies: [prefix]\n\
             # Only accept these file extensions (empty accepts any path)\n\
             extensions: []\n\
             # Base filenames to skip, e.g. \"*.tmp\"\n\
             skip: []\n\
             file_mode: 0o{:o}\n\
             dir_mode: 0o{:o}\n",
            defaults.output.display(),
            prefixes.join(", "),
            defaults.file_mode,
            defaults.dir_mode,
        )
    }
}
