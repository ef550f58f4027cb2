use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mdgen operations
#[derive(Error, Diagnostic, Debug)]
pub enum MdgenError {
    #[error("IO error: {0}")]
    #[diagnostic(code(mdgen::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mdgen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("JSON error: {0}")]
    #[diagnostic(code(mdgen::json))]
    Json(#[from] serde_json::Error),

    #[error("Scan error: {message}")]
    #[diagnostic(code(mdgen::scan))]
    Scan { message: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(mdgen::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Post-process failed for {path}: {message}")]
    #[diagnostic(code(mdgen::hook))]
    Hook {
        path: std::path::PathBuf,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, MdgenError>;
