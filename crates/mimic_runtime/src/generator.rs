//! Reply generation against a served checkpoint.

use std::sync::Arc;
use std::time::Instant;

use mimic_constant::{defaults, markers};
use mimic_core::PromptTemplate;
use mimic_llms::{DecodingParams, GenerateRequest, Provider};
use mimic_observability::{generation_span, record_duration, record_error};
use tracing::{debug, info, warn, Instrument};

use crate::error::{Result, RuntimeError};

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model name as served by the backend.
    pub model: String,
    /// Only used in error messages.
    pub base_url: String,
    pub template: PromptTemplate,
    pub params: DecodingParams,
}

pub struct ReplyGenerator {
    provider: Arc<dyn Provider>,
    config: GeneratorConfig,
}

impl std::fmt::Debug for ReplyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyGenerator")
            .field("provider", &self.provider.provider_id())
            .field("config", &self.config)
            .finish()
    }
}

impl ReplyGenerator {
    /// Connect to the backend and make sure it serves the configured model.
    ///
    /// Either failure is [`RuntimeError::ModelUnavailable`]; there is nothing to
    /// fall back to without a model.
    pub async fn load(provider: Arc<dyn Provider>, config: GeneratorConfig) -> Result<Self> {
        let unavailable = |reason: String| RuntimeError::ModelUnavailable {
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            reason,
        };

        let models = provider
            .list_models()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !models.iter().any(|served| serves(served, &config.model)) {
            let reason = if models.is_empty() {
                "the backend serves no models".to_string()
            } else {
                format!("the backend serves {}", models.join(", "))
            };
            return Err(unavailable(reason));
        }

        info!(
            provider = provider.provider_id(),
            model = %config.model,
            "Model available"
        );
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// One reply for `history` (oldest message first).
    ///
    /// The continuation is appended to the prompt and the result is run through
    /// the post-processor, so a model that echoes earlier turns still yields
    /// only its last owner line.
    pub async fn try_generate<S: AsRef<str>>(
        &self,
        history: &[S],
        temperature: f32,
    ) -> Result<String> {
        let prompt = self.config.template.prompt(history);
        let span = generation_span!(self.config.model, temperature, history.len());

        async {
            let request = GenerateRequest::new(self.config.model.as_str(), prompt.as_str())
                .with_params(self.config.params.clone().with_temperature(temperature));

            let start = Instant::now();
            let result = self.provider.generate(request).await;
            record_duration("duration_ms", start.elapsed());

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    let err = RuntimeError::Generation(e);
                    record_error(&err);
                    return Err(err);
                }
            };

            let decoded = format!("{}{}", prompt, response.text);
            let reply = self.config.template.extract_reply(&decoded);
            debug!(
                reply.chars = reply.chars().count(),
                finish_reason = ?response.finish_reason,
                "Reply generated"
            );
            Ok(reply)
        }
        .instrument(span)
        .await
    }

    /// Like [`try_generate`](Self::try_generate), but a failed call yields the
    /// fallback apology instead of an error.
    pub async fn reply<S: AsRef<str>>(&self, history: &[S], temperature: f32) -> String {
        match self.try_generate(history, temperature).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Using fallback reply");
                markers::FALLBACK_REPLY.to_string()
            }
        }
    }

    /// `n` independent replies, the i-th sampled at `base_temperature + i * 0.1`.
    ///
    /// Requests run one after another. A failed sample becomes the fallback reply
    /// and never fails the batch.
    pub async fn candidates<S: AsRef<str>>(
        &self,
        history: &[S],
        n: usize,
        base_temperature: f32,
    ) -> Vec<String> {
        let mut replies = Vec::with_capacity(n);
        for i in 0..n {
            let temperature = base_temperature + i as f32 * defaults::TEMPERATURE_STEP;
            replies.push(self.reply(history, temperature).await);
        }
        replies
    }
}

/// Ollama reports `name:tag`; an untagged model name means `:latest`.
fn serves(served: &str, wanted: &str) -> bool {
    served == wanted || served.strip_suffix(":latest") == Some(wanted)
}
