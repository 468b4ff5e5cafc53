use thiserror::Error;

/// Custom error type for sandbox client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Sandbox returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::UnexpectedResponse(err.to_string())
    }
}
