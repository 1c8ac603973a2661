//! Turn markers shared by the prompt formatter and the reply post-processor.
//!
//! Training targets and generation prompts must use the same markers, otherwise the
//! fine-tuned model never reproduces the structure the post-processor looks for.

/// Prefix of every interlocutor line.
pub const INTERLOCUTOR: &str = "A: ";
/// Prefix of the owner's line.
pub const SELF: &str = "B: ";
/// End-of-turn marker (GPT-2 family end-of-text token).
pub const END_OF_TURN: &str = "<|endoftext|>";

/// Chat-log type that carries one-to-one conversations.
pub const PERSONAL_CHAT: &str = "personal_chat";
/// Cleaned messages starting with this prefix are treated as link-only noise.
pub const LINK_PREFIX: &str = "http";
/// Cleaned messages shorter than this (in chars) are dropped.
pub const MIN_MESSAGE_CHARS: usize = 2;
/// Context window capacity.
pub const WINDOW_CAPACITY: usize = 3;

/// Returned in place of a reply when a single generation call fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't come up with a reply.";
