//! Error types for regshift

use crate::ast::Span;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// regshift errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error at {span}: {message}")]
    Parse { span: Span, message: String },

    #[error("Field shape violation at {span}: {message}")]
    FieldShape { span: Span, message: String },

    #[error("Registration call at {span} has no `{key}` field")]
    MissingPayload { span: Span, key: String },

    #[error("Print error: {0}")]
    Print(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{}: {}", .path.display(), .source)]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Attach the file being processed to this error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            already @ Error::InFile { .. } => already,
            other => Error::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
