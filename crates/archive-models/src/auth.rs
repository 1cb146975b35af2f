//! Google sign-in payloads.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Response of the backend's authorization URL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthUrlResponse {
    pub url: String,
}

/// Body sent to exchange an OAuth code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GoogleCallbackRequest {
    pub code: String,
}

/// Signed-in Google account as returned by the callback exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GoogleUser {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    /// Google access token
    pub token: String,
}

/// Locally persisted sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub user: GoogleUser,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: GoogleUser) -> Self {
        Self {
            user,
            signed_in_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthCodeError {
    #[error("Invalid callback URL: {0}")]
    InvalidUrl(String),

    #[error("No authorization code in callback URL")]
    NoCode,

    #[error("Authorization denied: {0}")]
    Denied(String),
}

/// Pull the `code` query parameter out of an OAuth redirect URL.
///
/// An `error` parameter takes precedence over a code.
pub fn extract_auth_code(callback_url: &str) -> Result<String, AuthCodeError> {
    let url = Url::parse(callback_url.trim())
        .map_err(|e| AuthCodeError::InvalidUrl(format!("{}: {}", callback_url, e)))?;

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return Err(AuthCodeError::Denied(value.into_owned())),
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.ok_or(AuthCodeError::NoCode)
}
