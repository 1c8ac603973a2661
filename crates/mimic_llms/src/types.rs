//! Unified request/response types shared by every provider.

use std::collections::BTreeMap;

use mimic_constant::defaults;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

/// Sampling configuration for one completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
    /// Generation stops before any of these strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            max_new_tokens: defaults::MAX_NEW_TOKENS,
            temperature: defaults::TEMPERATURE,
            top_p: defaults::TOP_P,
            top_k: defaults::TOP_K,
            repetition_penalty: defaults::REPETITION_PENALTY,
            no_repeat_ngram_size: defaults::NO_REPEAT_NGRAM_SIZE,
            stop: Vec::new(),
        }
    }
}

impl DecodingParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn with_stop(mut self, stop: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stop = stop.into_iter().map(Into::into).collect();
        self
    }
}

/// Per-request transport options.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub headers: Option<Headers>,
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    /// Raw prompt, sent without any chat template.
    pub prompt: String,
    pub params: DecodingParams,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            params: DecodingParams::default(),
            options: GenerateOptions::default(),
        }
    }

    pub fn with_params(mut self, params: DecodingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.options.headers = Some(headers);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// End-of-sequence or a stop string.
    Stop,
    /// Token budget exhausted.
    Length,
    Other(String),
    Unknown,
}

impl FinishReason {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("stop") | Some("eos") => Self::Stop,
            Some("length") => Self::Length,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// The continuation only, without the prompt.
    pub text: String,
    pub finish_reason: FinishReason,
    pub model: Option<String>,
}

/// Ordered, case-insensitive header set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.inner
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Values from `other` win.
    pub fn merge_with(&mut self, other: &Headers) {
        for (name, value) in &other.inner {
            self.inner.insert(name.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Entries that are not valid HTTP headers are dropped.
    pub fn to_reqwest_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in &self.inner {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                map.insert(name, value);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoding_defaults() {
        let params = DecodingParams::default();
        assert_eq!(params.max_new_tokens, 100);
        assert_eq!(params.top_k, 50);
        assert_eq!(params.no_repeat_ngram_size, 3);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
        assert!((params.top_p - 0.95).abs() < f32::EPSILON);
        assert!(params.stop.is_empty());
    }

    #[test]
    fn test_request_builders() {
        let request = GenerateRequest::new("m", "A: hi\nB: ")
            .with_params(DecodingParams::default().with_temperature(0.9).with_stop(["\nA:"]));
        assert_eq!(request.params.temperature, 0.9);
        assert_eq!(request.params.stop, vec!["\nA:"]);
        assert!(request.options.headers.is_none());
    }

    #[test]
    fn test_headers_merge_and_case() {
        let mut base = Headers::new();
        base.insert("Content-Type", "application/json");
        base.insert("Authorization", "Bearer a");

        let mut custom = Headers::new();
        custom.insert("authorization", "Bearer b");
        custom.insert("X-Trace", "1");
        base.merge_with(&custom);

        assert_eq!(base.len(), 3);
        assert_eq!(base.get("AUTHORIZATION"), Some("Bearer b"));

        let map = base.to_reqwest_headers();
        assert_eq!(map.get("x-trace").unwrap(), "1");
    }

    #[test]
    fn test_invalid_header_dropped() {
        let mut headers = Headers::new();
        headers.insert("bad header", "x");
        headers.insert("ok", "y");
        assert_eq!(headers.to_reqwest_headers().len(), 1);
    }

    #[test]
    fn test_finish_reason() {
        assert_eq!(FinishReason::from_raw(Some("stop")), FinishReason::Stop);
        assert_eq!(FinishReason::from_raw(Some("length")), FinishReason::Length);
        assert_eq!(FinishReason::from_raw(None), FinishReason::Unknown);
        assert_eq!(
            FinishReason::from_raw(Some("unload")),
            FinishReason::Other("unload".into())
        );
    }
}
