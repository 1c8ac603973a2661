use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservabilityError {
    #[error("Failed to initialize observability: {0}")]
    InitFailed(String),

    #[error("Invalid log filter '{directives}': {reason}")]
    Filter { directives: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ObservabilityError::Filter {
            directives: "=[".into(),
            reason: "bad".into(),
        };
        assert_eq!(err.to_string(), "Invalid log filter '=[': bad");
        assert_eq!(
            ObservabilityError::InitFailed("already set".into()).to_string(),
            "Failed to initialize observability: already set"
        );
    }
}
