//! Console configuration
//!
//! Connection settings for the scheduler service and presentation defaults.
//! The status poll interval is fixed and not configurable.

use std::time::Duration;
use vine_core::domain::history::{
    DEFAULT_PAGE_SIZE, HistoryFilter, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
};

/// Console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Scheduler API base URL including its prefix
    /// (e.g., "http://localhost:8080/api/v1")
    pub api_url: String,

    /// Transport timeout applied to every request
    pub request_timeout: Duration,

    /// Page size the history view starts with
    pub history_page_size: i64,
}

impl ConsoleConfig {
    /// Creates a new configuration with defaults
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            request_timeout: Duration::from_secs(10),
            history_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - VINE_API_URL (optional, default: http://localhost:8080/api/v1)
    /// - VINE_REQUEST_TIMEOUT (optional, seconds, default: 10)
    /// - VINE_HISTORY_PAGE_SIZE (optional, default: 20)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var("VINE_API_URL")
            .unwrap_or_else(|_| vine_client::DEFAULT_BASE_URL.to_string());

        let request_timeout = match std::env::var("VINE_REQUEST_TIMEOUT") {
            Ok(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                anyhow::anyhow!("VINE_REQUEST_TIMEOUT must be a number of seconds, got '{}'", raw)
            })?),
            Err(_) => Duration::from_secs(10),
        };

        let history_page_size = match std::env::var("VINE_HISTORY_PAGE_SIZE") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| {
                anyhow::anyhow!("VINE_HISTORY_PAGE_SIZE must be a number, got '{}'", raw)
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_url,
            request_timeout,
            history_page_size,
        })
    }

    /// Overrides the API URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.history_page_size) {
            anyhow::bail!(
                "history_page_size must be between {} and {}",
                MIN_PAGE_SIZE,
                MAX_PAGE_SIZE
            );
        }

        Ok(())
    }

    /// Filter the history view starts with
    pub fn initial_filter(&self) -> HistoryFilter {
        HistoryFilter::default().with_page_size(self.history_page_size)
    }

    /// HTTP client carrying the request timeout
    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new(vine_client::DEFAULT_BASE_URL.to_string())
    }
}
