use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to authenticate with Telegram: {0}")]
    AuthError(String),

    #[error("Failed to retrieve chat messages: {0}")]
    RetrievalError(String),

    #[error("Failed to generate digest: {0}")]
    GenerationError(String),

    #[error("Failed to deliver digest: {0}")]
    DeliveryError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to load or persist session: {0}")]
    SessionError(String),
}

impl From<reqwest::Error> for DigestError {
    fn from(error: reqwest::Error) -> Self {
        DigestError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(error: serde_json::Error) -> Self {
        DigestError::GenerationError(format!("Malformed response body: {}", error))
    }
}

impl From<std::io::Error> for DigestError {
    fn from(error: std::io::Error) -> Self {
        DigestError::SessionError(error.to_string())
    }
}

impl From<anyhow::Error> for DigestError {
    fn from(error: anyhow::Error) -> Self {
        DigestError::RetrievalError(error.to_string())
    }
}
