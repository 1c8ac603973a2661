//! Ollama provider implementation (self-hosted, no API key).

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::convert::{from_ollama_response, to_ollama_request};
use super::types::{OllamaConfig, OllamaGenerateResponse, TagList};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

pub struct OllamaProvider {
    config: OllamaConfig,
    client: Client,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn provider_id(&self) -> &str {
        "ollama"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }
        headers
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(None).to_reqwest_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagList = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/api/generate", self.config.base_url);
        let body = to_ollama_request(&request);
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

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: OllamaGenerateResponse = serde_json::from_str(&text)?;
        from_ollama_response(parsed)
    }
}
