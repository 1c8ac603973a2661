//! Conversation extraction: turn one chat log into (context, response) pairs.

use std::path::Path;

use mimic_constant::markers;
use tracing::debug;

use crate::error::Result;
use crate::message::{ChatLog, MessageKind, RawMessage};
use crate::normalize::normalize;
use crate::pair::TrainingPair;
use crate::window::ContextWindow;

/// Extraction settings. `owner` is the sender name of the person being imitated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub owner: String,
    pub window_capacity: usize,
    pub min_chars: usize,
    pub link_prefix: String,
}

impl ExtractorConfig {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            window_capacity: markers::WINDOW_CAPACITY,
            min_chars: markers::MIN_MESSAGE_CHARS,
            link_prefix: markers::LINK_PREFIX.to_string(),
        }
    }

    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Read one chat-log file and extract its pairs. Pairs are tagged with the file name.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<TrainingPair>> {
        let log = ChatLog::from_path(path)?;
        let source_file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.extract(&log, &source_file))
    }

    /// Single forward pass over the log.
    ///
    /// Interlocutor messages fill the window; an owner message flushes it into a pair.
    /// An owner message arriving on an empty window is ignored and changes nothing.
    /// Non-personal logs yield nothing.
    pub fn extract(&self, log: &ChatLog, source_file: &str) -> Vec<TrainingPair> {
        if !log.is_personal() {
            debug!(
                source_file,
                kind = ?log.kind,
                "Skipping non-personal chat"
            );
            return Vec::new();
        }

        let chat_name = log.display_name();
        let mut window = ContextWindow::new(self.config.window_capacity);
        let mut pairs = Vec::new();

        for message in &log.messages {
            let Some(text) = self.clean(message) else {
                continue;
            };

            if message.sender() == Some(self.config.owner.as_str()) {
                if !window.is_empty() {
                    pairs.push(TrainingPair::new(
                        window.flush(),
                        text,
                        source_file,
                        chat_name,
                    ));
                }
            } else {
                window.push(text);
            }
        }

        debug!(source_file, pairs = pairs.len(), "Extracted pairs");
        pairs
    }

    /// Apply the filtering policy; `None` means the entry is skipped.
    fn clean(&self, message: &RawMessage) -> Option<String> {
        if message.kind != MessageKind::Message {
            return None;
        }
        let text = normalize(message.text.as_ref()?);
        if text.chars().count() < self.config.min_chars
            || text.starts_with(self.config.link_prefix.as_str())
        {
            return None;
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageText;

    const OWNER: &str = "Me";

    fn extractor() -> Extractor {
        Extractor::new(ExtractorConfig::new(OWNER))
    }

    fn personal(messages: Vec<RawMessage>) -> ChatLog {
        ChatLog {
            kind: Some("personal_chat".to_string()),
            name: Some("Alice".to_string()),
            messages,
        }
    }

    fn incoming(text: &str) -> RawMessage {
        RawMessage::message("Alice", text)
    }

    fn outgoing(text: &str) -> RawMessage {
        RawMessage::message(OWNER, text)
    }

    #[test]
    fn test_flush_then_append_pairing() {
        let log = personal(vec![
            incoming("Hi"),
            incoming("How are you"),
            outgoing("Good, thanks"),
            incoming("Cool"),
            outgoing("And you?"),
        ]);

        let pairs = extractor().extract(&log, "alice.json");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].context, vec!["Hi", "How are you"]);
        assert_eq!(pairs[0].response, "Good, thanks");
        assert_eq!(pairs[1].context, vec!["Cool"]);
        assert_eq!(pairs[1].response, "And you?");
        assert_eq!(pairs[1].source_file, "alice.json");
        assert_eq!(pairs[1].chat_name, "Alice");
    }

    #[test]
    fn test_no_emission_without_context() {
        let log = personal(vec![
            incoming("Hi"),
            outgoing("Hello"),
            outgoing("Are you there?"),
            outgoing("Hello??"),
            incoming("yes"),
            outgoing("great"),
        ]);

        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].response, "Hello");
        assert_eq!(pairs[1].context, vec!["yes"]);
        assert_eq!(pairs[1].response, "great");
    }

    #[test]
    fn test_outgoing_first_is_noop() {
        let log = personal(vec![outgoing("first"), outgoing("second")]);
        assert!(extractor().extract(&log, "a.json").is_empty());
    }

    #[test]
    fn test_window_keeps_last_three() {
        let log = personal(vec![
            incoming("one"),
            incoming("two"),
            incoming("three"),
            incoming("four"),
            incoming("five"),
            outgoing("reply"),
        ]);

        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].context, vec!["three", "four", "five"]);
    }

    #[test]
    fn test_custom_window_capacity() {
        let extractor = Extractor::new(ExtractorConfig::new(OWNER).with_window_capacity(1));
        let log = personal(vec![incoming("one"), incoming("two"), outgoing("reply")]);

        let pairs = extractor.extract(&log, "a.json");
        assert_eq!(pairs[0].context, vec!["two"]);
    }

    #[test]
    fn test_non_personal_chat_yields_nothing() {
        let mut log = personal(vec![incoming("Hi there"), outgoing("Hello")]);
        log.kind = Some("private_group".to_string());
        assert!(extractor().extract(&log, "a.json").is_empty());

        log.kind = None;
        assert!(extractor().extract(&log, "a.json").is_empty());
    }

    #[test]
    fn test_filtering() {
        let log = personal(vec![
            incoming("k"),
            incoming("https://example.org"),
            incoming("http stuff"),
            incoming("😀"),
            outgoing("x"),
            outgoing("http://link"),
            incoming("real question"),
            outgoing("real answer"),
        ]);

        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].context, vec!["real question"]);
        assert_eq!(pairs[0].response, "real answer");
    }

    #[test]
    fn test_filtered_outgoing_does_not_flush() {
        let log = personal(vec![
            incoming("question"),
            outgoing("k"),
            outgoing("answer"),
        ]);

        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].context, vec!["question"]);
        assert_eq!(pairs[0].response, "answer");
    }

    #[test]
    fn test_service_messages_leave_window_untouched() {
        let log = personal(vec![
            incoming("before call"),
            RawMessage::service("Alice called"),
            RawMessage {
                kind: MessageKind::Message,
                from: Some("Alice".to_string()),
                text: None,
            },
            outgoing("after call"),
        ]);

        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].context, vec!["before call"]);
    }

    #[test]
    fn test_missing_sender_counts_as_interlocutor() {
        let log = personal(vec![
            RawMessage {
                kind: MessageKind::Message,
                from: None,
                text: Some(MessageText::from("deleted account says hi")),
            },
            outgoing("hi"),
        ]);

        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs[0].context, vec!["deleted account says hi"]);
    }

    #[test]
    fn test_emoji_only_messages_are_dropped() {
        let log = personal(vec![
            incoming("\u{2764}\u{fe0f}\u{2764}\u{fe0f}"),
            incoming("\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}"),
            outgoing("thanks"),
        ]);
        assert!(extractor().extract(&log, "a.json").is_empty());

        let log = personal(vec![
            incoming("\u{1f44d}\u{1f3fd}"),
            incoming("coming tonight?"),
            outgoing("\u{2764}\u{fe0f}"),
            outgoing("yes"),
        ]);
        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].context, vec!["coming tonight?"]);
        assert_eq!(pairs[0].response, "yes");
    }

    #[test]
    fn test_responses_are_normalized() {
        let log = personal(vec![incoming("Hey 👋"), outgoing("  yo   🎉 man ")]);

        let pairs = extractor().extract(&log, "a.json");
        assert_eq!(pairs[0].context, vec!["Hey"]);
        assert_eq!(pairs[0].response, "yo man");
    }

    #[test]
    fn test_extract_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("result.json");
        std::fs::write(
            &path,
            r#"{"type":"personal_chat","messages":[
                {"type":"message","from":"Bob","text":"ping"},
                {"type":"message","from":"Me","text":[{"type":"bold","text":"pong"}]}
            ]}"#,
        )
        .unwrap();

        let pairs = extractor().extract_file(&path).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].response, "pong");
        assert_eq!(pairs[0].source_file, "result.json");
        assert_eq!(pairs[0].chat_name, "Unknown");
    }
}
