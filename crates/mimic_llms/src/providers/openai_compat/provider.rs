//! OpenAI-compatible provider implementation

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::convert::{from_completion_response, to_completion_request};
use super::types::{CompletionResponse, ModelList, OpenAICompatConfig};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

pub struct OpenAICompatProvider {
    config: OpenAICompatConfig,
    client: Client,
}

impl OpenAICompatProvider {
    pub fn new(config: OpenAICompatConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &OpenAICompatConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for OpenAICompatProvider {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        if let Some(ref key) = self.config.api_key {
            headers.insert("Authorization", format!("Bearer {}", key));
        }

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models", self.config.base_url);
        let headers = self.build_headers(None);

        let response = self
            .client
            .get(&url)
            .headers(headers.to_reqwest_headers())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let list: ModelList = response.json().await?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/completions", self.config.base_url);
        let body = to_completion_request(&request);
        let headers = self.build_headers(request.options.headers.as_ref());

        debug!(
            model = %request.model,
            prompt.chars = request.prompt.chars().count(),
            temperature = request.params.temperature,
            "POST {}",
            url
        );

        let response = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        from_completion_response(completion)
    }
}
