use std::path::PathBuf;

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing credential, missing photo directory and similar setup problems.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model response was not valid JSON for {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model response for {file}: {message}")]
    Validation { file: String, message: String },

    /// Image encoding or transport failure from the client crate.
    #[error("Request failed for {file}: {message}")]
    Remote { file: String, message: String },

    #[error("No supported image files found in {}", dir.display())]
    EmptyResult { dir: PathBuf },

    #[error("Failed to write {}: {message}", path.display())]
    Export { path: PathBuf, message: String },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn validation(file: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Validation {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Keeps the whole `anyhow` context chain in the message.
    pub fn remote(file: impl Into<String>, err: anyhow::Error) -> Self {
        PipelineError::Remote {
            file: file.into(),
            message: format!("{err:#}"),
        }
    }

    pub fn export(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        PipelineError::Export {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
