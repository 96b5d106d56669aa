use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("http client setup failed: {0}")]
    Client(String),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("upstream returned status {status}")]
    Status { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response missing content: {0}")]
    MissingContent(&'static str),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("provider not supported for remote calls: {0}")]
    UnsupportedProvider(String),
}

impl ModelError {
    pub(crate) fn from_send(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ModelError::Timeout(timeout)
        } else {
            ModelError::Invocation(err.to_string())
        }
    }
}
