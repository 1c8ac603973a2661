//! OpenAI-compatible text completions
//!
//! Targets the legacy `/completions` endpoint served by vLLM, TGI, llama.cpp
//! server and friends, which take a raw prompt instead of chat messages.

mod convert;
mod provider;
mod types;

pub use provider::OpenAICompatProvider;
pub use types::{CompletionRequest, CompletionResponse, OpenAICompatConfig};
