//! Exported chat-log schema.
//!
//! One JSON document per chat: `type`, `name` and an ordered `messages` array. A
//! message's `text` is either a plain string or a list of fragments, where each
//! fragment is a string or an entity object carrying its own `text`.

use std::fs;
use std::path::Path;

use mimic_constant::markers;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// One exported chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatLog {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

impl ChatLog {
    /// Read and parse a chat-log file. Any read or schema failure is an
    /// [`CoreError::InputFormat`] naming the file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| CoreError::input_format(path, e))?;
        serde_json::from_str(&raw).map_err(|e| CoreError::input_format(path, e))
    }

    /// Only one-to-one chats yield training pairs.
    pub fn is_personal(&self) -> bool {
        self.kind.as_deref() == Some(markers::PERSONAL_CHAT)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Entry kind as exported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    Service,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    /// Sender display name; absent for deleted accounts.
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub text: Option<MessageText>,
}

impl RawMessage {
    pub fn message(from: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Message,
            from: Some(from.into()),
            text: Some(MessageText::Plain(text.into())),
        }
    }

    pub fn service(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Service,
            from: None,
            text: Some(MessageText::Plain(text.into())),
        }
    }

    pub fn sender(&self) -> Option<&str> {
        self.from.as_deref()
    }
}

/// Message body: plain text or a list of formatted fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Fragments(Vec<Fragment>),
}

impl MessageText {
    /// Concatenate fragment text in order, no separator.
    pub fn flatten(&self) -> String {
        match self {
            MessageText::Plain(text) => text.clone(),
            MessageText::Fragments(fragments) => {
                fragments.iter().map(Fragment::as_text).collect::<String>()
            }
        }
    }
}

impl From<&str> for MessageText {
    fn from(text: &str) -> Self {
        MessageText::Plain(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    Plain(String),
    /// Formatted span (link, bold, mention, ...).
    Entity {
        text: String,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
    Number(serde_json::Number),
    Bool(bool),
}

impl Fragment {
    pub fn as_text(&self) -> String {
        match self {
            Fragment::Plain(text) => text.clone(),
            Fragment::Entity { text, .. } => text.clone(),
            Fragment::Number(n) => n.to_string(),
            Fragment::Bool(true) => "True".to_string(),
            Fragment::Bool(false) => "False".to_string(),
        }
    }
}
