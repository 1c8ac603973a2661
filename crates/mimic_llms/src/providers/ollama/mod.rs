//! Ollama provider
//!
//! Uses `/api/generate` in raw mode so the model's own template is bypassed.

mod convert;
mod provider;
mod types;

pub use provider::OllamaProvider;
pub use types::{OllamaConfig, OllamaGenerateRequest, OllamaGenerateResponse};
