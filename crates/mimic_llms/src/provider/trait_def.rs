use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A text-completion backend.
///
/// Implementations send the prompt verbatim and return only the generated
/// continuation.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, e.g. `"openai"` or `"ollama"`.
    fn provider_id(&self) -> &str;

    /// Headers sent with every request, merged with per-request ones.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Names of the models the backend currently serves.
    async fn list_models(&self) -> Result<Vec<String>>;

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
