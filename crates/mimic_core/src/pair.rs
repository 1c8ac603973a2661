use serde::{Deserialize, Serialize};

/// One supervised example: up to a window's worth of interlocutor messages and the
/// owner's reply that followed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    pub context: Vec<String>,
    pub response: String,
    pub source_file: String,
    pub chat_name: String,
}

impl TrainingPair {
    pub fn new(
        context: Vec<String>,
        response: impl Into<String>,
        source_file: impl Into<String>,
        chat_name: impl Into<String>,
    ) -> Self {
        Self {
            context,
            response: response.into(),
            source_file: source_file.into(),
            chat_name: chat_name.into(),
        }
    }

    /// Response length in characters.
    pub fn response_chars(&self) -> usize {
        self.response.chars().count()
    }
}
