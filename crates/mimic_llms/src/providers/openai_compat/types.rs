//! Wire types for the OpenAI-compatible completions API

use mimic_constant::defaults;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct OpenAICompatConfig {
    /// Base URL including the version segment, without a trailing slash.
    pub base_url: String,
    /// Bearer token; local servers usually need none.
    pub api_key: Option<String>,
}

impl OpenAICompatConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
        self
    }
}

impl Default for OpenAICompatConfig {
    fn default() -> Self {
        Self::new(defaults::BASE_URL)
    }
}

/// `POST /completions` body.
///
/// `top_k` and `repetition_penalty` are sampling extensions accepted by vLLM
/// and TGI; `no_repeat_ngram_size` has no wire equivalent and is not sent.
#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// `GET /models` body.
#[derive(Debug, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub id: String,
}
