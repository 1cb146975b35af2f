//! Archive backend HTTP client.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use archive_models::{
    AuthUrlResponse, GoogleCallbackRequest, GoogleUser, UploadForm, UploadKind, VideoRecord,
};

use crate::error::{ClientError, ClientResult};
use crate::types::error_detail;

/// Configuration for the archive client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the archive backend
    pub base_url: String,
    /// Timeout for ordinary requests
    pub timeout: Duration,
    /// Timeout for uploads
    pub upload_timeout: Duration,
    /// Max retries for idempotent requests
    pub max_retries: u32,
    /// First retry delay; doubles on each attempt
    pub retry_base_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(600), // large ZIP archives
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("ARCHIVE_API_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("ARCHIVE_API_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            upload_timeout: std::env::var("ARCHIVE_UPLOAD_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.upload_timeout),
            max_retries: std::env::var("ARCHIVE_API_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_base_delay: defaults.retry_base_delay,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the archive REST backend.
#[derive(Clone)]
pub struct ArchiveClient {
    http: Client,
    config: ClientConfig,
}

impl ArchiveClient {
    /// Create a new archive client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("archive-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Check whether the backend answers at all.
    pub async fn check_connectivity(&self) -> ClientResult<bool> {
        let url = self.url("/api/videos/");

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => Ok(true),
            Ok(response) => {
                warn!("Archive API connectivity check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Archive API connectivity check error: {}", e);
                Ok(false)
            }
        }
    }

    /// Fetch the full catalog.
    ///
    /// The backend must answer with a JSON array; anything else is an
    /// error rather than an empty catalog.
    pub async fn list_videos(&self) -> ClientResult<Vec<VideoRecord>> {
        let url = self.url("/api/videos/");
        debug!("Fetching catalog from {}", url);

        let body: Value = self
            .with_retry("list_videos", || async {
                let response = self.http.get(&url).send().await?;
                Self::json_or_error(response).await
            })
            .await?;

        if !body.is_array() {
            return Err(ClientError::invalid_response(format!(
                "expected a list of videos, got {}",
                json_kind(&body)
            )));
        }

        let videos: Vec<VideoRecord> = serde_json::from_value(body)?;
        debug!(count = videos.len(), "Fetched catalog");
        Ok(videos)
    }

    /// Upload a video or ZIP archive with its metadata.
    pub async fn upload_video(&self, path: &Path, form: &UploadForm) -> ClientResult<VideoRecord> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::invalid_response(format!("not a file path: {}", path.display())))?
            .to_string();

        let kind = UploadKind::from_file_name(&file_name)?;
        let form = form.clone().validated()?;

        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();
        let body = Body::wrap_stream(ReaderStream::new(file));
        let file_part = Part::stream_with_length(body, size)
            .file_name(file_name.clone())
            .mime_str(kind.content_type())?;

        let mut multipart = Form::new().part("file", file_part);
        for (name, value) in form.text_fields() {
            multipart = multipart.text(name, value.to_string());
        }

        let url = self.url("/api/videos/upload");
        info!(file = %file_name, size, kind = kind.label(), "Uploading to {}", url);

        // Uploads are not idempotent; no retry
        let response = self
            .http
            .post(&url)
            .timeout(self.config.upload_timeout)
            .multipart(multipart)
            .send()
            .await?;

        let record: VideoRecord = Self::json_or_error(response).await?;
        info!(id = %record.id, "Upload complete");
        Ok(record)
    }

    /// Ask the backend for the Google consent page URL.
    pub async fn google_auth_url(&self) -> ClientResult<String> {
        let url = self.url("/api/auth/google/url");

        let response: AuthUrlResponse = self
            .with_retry("google_auth_url", || async {
                let response = self.http.get(&url).send().await?;
                Self::json_or_error(response).await
            })
            .await?;

        Ok(response.url)
    }

    /// Exchange an authorization code for the signed-in account.
    pub async fn exchange_google_code(&self, code: &str) -> ClientResult<GoogleUser> {
        let url = self.url("/api/auth/google/callback");
        debug!("Exchanging authorization code at {}", url);

        // Codes are single-use; no retry
        let response = self
            .http
            .post(&url)
            .json(&GoogleCallbackRequest {
                code: code.to_string(),
            })
            .send()
            .await?;

        Self::json_or_error(response).await
    }

    async fn json_or_error<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_http_status(status.as_u16(), error_detail(&body)));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: &str, op: F) -> ClientResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = ClientResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match op().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.config.retry_base_delay * 2u32.pow(attempt);
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Archive request failed, retrying: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ClientError::invalid_response("retry loop exited without a result")))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("ARCHIVE_API_URL", "http://archive.test:9000");
        std::env::set_var("ARCHIVE_API_TIMEOUT", "5");
        std::env::set_var("ARCHIVE_API_RETRIES", "not-a-number");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://archive.test:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 2);

        std::env::remove_var("ARCHIVE_API_URL");
        std::env::remove_var("ARCHIVE_API_TIMEOUT");
        std::env::remove_var("ARCHIVE_API_RETRIES");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ArchiveClient::new(ClientConfig::default().with_base_url("http://h:1/")).unwrap();
        assert_eq!(client.url("/api/videos/"), "http://h:1/api/videos/");
    }
}
