//! Dataset error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Input directory not found: {}", .0.display())]
    MissingInputDir(PathBuf),

    /// Aggregation finished without a single pair. `hints` are next steps for the user.
    #[error("No training pairs found in {}", .dir.display())]
    NoTrainingData { dir: PathBuf, hints: Vec<String> },

    #[error("Input directory path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Core(#[from] mimic_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatasetError {
    pub fn no_training_data(dir: impl Into<PathBuf>, owner: &str) -> Self {
        Self::NoTrainingData {
            dir: dir.into(),
            hints: vec![
                "Check that the files are chat exports in JSON format (one file per chat)"
                    .to_string(),
                format!("Check that the chats contain messages sent by '{owner}'"),
                "Only personal (one-to-one) chats are used; group and channel exports are skipped"
                    .to_string(),
            ],
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_training_data_hints_name_owner() {
        let err = DatasetError::no_training_data("chats", "Andrey");
        assert_eq!(err.to_string(), "No training pairs found in chats");
        let DatasetError::NoTrainingData { hints, .. } = err else {
            panic!("wrong variant");
        };
        assert_eq!(hints.len(), 3);
        assert!(hints[1].contains("'Andrey'"));
    }

    #[test]
    fn test_missing_dir_message() {
        let err = DatasetError::MissingInputDir(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Input directory not found: /nope");
    }
}
