//! Prompt formatting and reply post-processing.
//!
//! A dialogue is rendered as one line per interlocutor message followed by the
//! owner's line:
//!
//! ```text
//! A: Hi
//! A: How are you
//! B: Good, thanks<|endoftext|>
//! ```
//!
//! Training targets carry the response and the end-of-turn marker; generation
//! prompts stop right after the self marker.

use mimic_constant::markers;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub interlocutor_marker: String,
    pub self_marker: String,
    pub end_of_turn: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            interlocutor_marker: markers::INTERLOCUTOR.to_string(),
            self_marker: markers::SELF.to_string(),
            end_of_turn: markers::END_OF_TURN.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn with_end_of_turn(mut self, end_of_turn: impl Into<String>) -> Self {
        self.end_of_turn = end_of_turn.into();
        self
    }

    /// Render context (oldest first) and, for training targets, the response.
    pub fn format<S: AsRef<str>>(&self, context: &[S], response: Option<&str>) -> String {
        let mut text = String::new();
        for message in context {
            text.push_str(&self.interlocutor_marker);
            text.push_str(message.as_ref());
            text.push('\n');
        }
        text.push_str(&self.self_marker);
        if let Some(response) = response {
            text.push_str(response);
            text.push_str(&self.end_of_turn);
        }
        text
    }

    /// Generation prompt: the self line is left open.
    pub fn prompt<S: AsRef<str>>(&self, context: &[S]) -> String {
        self.format(context, None)
    }

    /// Pull the newly generated reply out of a decoded continuation.
    ///
    /// Takes whatever follows the last self marker, cut at the end-of-turn marker.
    /// Without a self marker the trimmed input is returned as is.
    pub fn extract_reply(&self, decoded: &str) -> String {
        let Some(idx) = decoded.rfind(self.self_marker.as_str()) else {
            return decoded.trim().to_string();
        };
        let reply = &decoded[idx + self.self_marker.len()..];
        let reply = match reply.find(self.end_of_turn.as_str()) {
            Some(end) if !self.end_of_turn.is_empty() => &reply[..end],
            _ => reply,
        };
        reply.trim().to_string()
    }
}
