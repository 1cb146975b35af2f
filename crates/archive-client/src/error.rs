//! Client error types.

use thiserror::Error;

use archive_models::UploadError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Archive API unavailable ({status}): {detail}")]
    ServiceUnavailable { status: u16, detail: String },

    #[error("Archive API returned {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Map a non-success HTTP status and its `detail` to an error.
    pub fn from_http_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match status {
            429 | 500..=599 => Self::ServiceUnavailable { status, detail },
            _ => Self::Api { status, detail },
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::ServiceUnavailable { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ServiceUnavailable { .. } => true,
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}
