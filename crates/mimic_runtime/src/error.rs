//! Runtime error types

use mimic_dataset::DatasetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The inference backend is unreachable or does not serve the model.
    #[error("Model '{model}' is not available at {base_url}: {reason}")]
    ModelUnavailable {
        model: String,
        base_url: String,
        reason: String,
    },

    /// One generation call failed. Recovered by the generator with the fallback reply.
    #[error("Generation failed: {0}")]
    Generation(#[from] mimic_llms::Error),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RuntimeError::ModelUnavailable {
            model: "my_dialogpt".into(),
            base_url: "http://localhost:8000/v1".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Model 'my_dialogpt' is not available at http://localhost:8000/v1: connection refused"
        );
        assert_eq!(
            RuntimeError::Training("exit status 1".into()).to_string(),
            "Training failed: exit status 1"
        );
    }

    #[test]
    fn test_dataset_error_is_transparent() {
        let err: RuntimeError =
            DatasetError::MissingInputDir(std::path::PathBuf::from("chats")).into();
        assert_eq!(
            err.to_string(),
            DatasetError::MissingInputDir("chats".into()).to_string()
        );
    }
}
