//! Wire types specific to the backend's HTTP surface.

use serde::Deserialize;
use serde_json::Value;

/// Error body returned by the backend: `{ "detail": ... }`.
///
/// `detail` is usually a string but validation failures carry a list.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Best-effort extraction of a human-readable error from a response body.
pub fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message())
        .unwrap_or_else(|_| body.trim().to_string())
}
