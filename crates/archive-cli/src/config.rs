//! CLI configuration.

use std::path::PathBuf;

use archive_client::{ClientConfig, SessionStore};

use crate::cli::Cli;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Human,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Backend client settings
    pub client: ClientConfig,
    /// Where the signed-in account is stored
    pub session_file: PathBuf,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            session_file: SessionStore::from_env().path().to_path_buf(),
            log_format: LogFormat::from_env(),
        }
    }

    /// Apply per-invocation flag overrides.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(api_url) = &cli.api_url {
            self.client.base_url = api_url.clone();
        }
        if let Some(session_file) = &cli.session_file {
            self.session_file = session_file.clone();
        }
        self
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(&self.session_file)
    }
}
