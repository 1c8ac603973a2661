//! SDK error type

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer from the backend.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether the backend could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect() || e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ProviderNotFound("vllm".into()).to_string(),
            "Provider not found: vllm"
        );
        assert_eq!(
            Error::Api {
                status: 404,
                body: "model not found".into()
            }
            .to_string(),
            "API error 404: model not found"
        );
        assert_eq!(
            Error::invalid_response("no choices").to_string(),
            "Invalid response: no choices"
        );
    }

    #[test]
    fn test_is_connect_only_for_transport() {
        assert!(!Error::Other("x".into()).is_connect());
        assert!(
            !Error::Api {
                status: 500,
                body: String::new()
            }
            .is_connect()
        );
    }
}
