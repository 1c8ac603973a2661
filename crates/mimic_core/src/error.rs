use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A chat-log file could not be read or does not match the export schema.
    #[error("invalid chat log {}: {reason}", .path.display())]
    InputFormat { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn input_format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InputFormat {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
