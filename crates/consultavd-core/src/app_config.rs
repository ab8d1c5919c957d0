use std::time::Duration;

use crate::config::check_api_url;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_url: String,
    pub api_token: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub store_search_debounce_ms: u64,
    pub store_search_min_chars: usize,
    pub page_size: usize,
}

impl AppConfig {
    /// Quiet period the store-search input must observe before a lookup fires.
    #[must_use]
    pub fn store_search_debounce(&self) -> Duration {
        Duration::from_millis(self.store_search_debounce_ms)
    }

    /// Replaces the backend URL with one given on the command line, under
    /// the same scheme check as `CONSULTAVD_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` naming `--api-url` when the URL
    /// is not http(s); the configuration is left unchanged.
    pub fn set_api_url(&mut self, url: String) -> Result<(), ConfigError> {
        check_api_url("--api-url", &url)?;
        self.api_url = url;
        Ok(())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("store_search_debounce_ms", &self.store_search_debounce_ms)
            .field("store_search_min_chars", &self.store_search_min_chars)
            .field("page_size", &self.page_size)
            .finish()
    }
}
