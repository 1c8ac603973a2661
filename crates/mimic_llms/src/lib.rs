//! mimic_llms: provider-agnostic text completion for the reply generator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  ProviderRegistry                    │
//! │  ┌──────────────────────────────────────────────┐    │
//! │  │  HashMap<String, Arc<dyn Provider>>          │    │
//! │  └──────────────────────────────────────────────┘    │
//! │                       │                              │
//! │               ┌───────┴────────┐                     │
//! │               ▼                ▼                     │
//! │      ┌────────────────┐  ┌──────────┐                │
//! │      │ OpenAI-compat  │  │  Ollama  │                │
//! │      │ /completions   │  │ /api/... │                │
//! │      └────────────────┘  └──────────┘                │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Both backends take a raw prompt and return the continuation only; no chat
//! template is applied, the caller owns the prompt format.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mimic_llms::{GenerateRequest, OllamaProvider, Provider, ProviderRegistry};
//! use mimic_llms::providers::ollama::OllamaConfig;
//!
//! # async fn run() -> mimic_llms::Result<()> {
//! let registry = ProviderRegistry::new()
//!     .register("ollama", OllamaProvider::new(OllamaConfig::default()));
//! let provider = registry.get_provider("ollama")?;
//! let response = provider
//!     .generate(GenerateRequest::new("my-dialogpt", "A: hi\nB: "))
//!     .await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;


pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

pub use providers::{OllamaProvider, OpenAICompatProvider};

pub use types::{
    DecodingParams, FinishReason, GenerateOptions, GenerateRequest, GenerateResponse, Headers,
};
