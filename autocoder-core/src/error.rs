/// Failure classes reported by a chat-completion provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ModelError {
    /// Map an HTTP status from the provider onto an error class.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 404 | 409 | 422 => ModelError::InvalidRequest(message),
            401 => ModelError::Authentication(message),
            403 => ModelError::PermissionDenied(message),
            408 => ModelError::Timeout(message),
            429 => ModelError::RateLimited(message),
            _ => ModelError::Api { status, message },
        }
    }

    /// Transient failures are worth retrying and are logged as warnings.
    pub fn is_transient(&self) -> bool {
        match self {
            ModelError::Network(_) | ModelError::Timeout(_) | ModelError::RateLimited(_) => true,
            ModelError::Api { status, .. } => matches!(status, 500 | 502 | 503 | 504 | 529),
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AutocoderError {
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutocoderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AutocoderError::Agent("test error".to_string());
        assert_eq!(err.to_string(), "Agent error: test error");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AutocoderError = io_err.into();
        assert!(matches!(err, AutocoderError::Io(_)));
    }

    #[test]
    fn test_model_error_wraps_into_autocoder_error() {
        let err: AutocoderError = ModelError::RateLimited("slow down".to_string()).into();
        assert_eq!(err.to_string(), "Model error: Rate limit exceeded: slow down");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ModelError::from_status(400, "bad"), ModelError::InvalidRequest(_)));
        assert!(matches!(ModelError::from_status(401, "key"), ModelError::Authentication(_)));
        assert!(matches!(ModelError::from_status(403, "nope"), ModelError::PermissionDenied(_)));
        assert!(matches!(ModelError::from_status(429, "slow"), ModelError::RateLimited(_)));
        assert!(matches!(
            ModelError::from_status(503, "down"),
            ModelError::Api { status: 503, .. }
        ));
    }

    #[test]
    fn test_transient_classes() {
        assert!(ModelError::Network("reset".into()).is_transient());
        assert!(ModelError::RateLimited("429".into()).is_transient());
        assert!(ModelError::Api { status: 502, message: "bad gateway".into() }.is_transient());
        assert!(!ModelError::Api { status: 418, message: "teapot".into() }.is_transient());
        assert!(!ModelError::Authentication("bad key".into()).is_transient());
        assert!(!ModelError::Decode("garbage".into()).is_transient());
    }
}
