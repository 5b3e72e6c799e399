//! VINE Scheduler Client
//!
//! A type-safe HTTP client for the VINE scheduler service.
//!
//! The console never talks to the service except through [`SchedulerApi`];
//! [`SchedulerClient`] is its `reqwest` implementation.
//!
//! # Example
//!
//! ```no_run
//! use vine_client::SchedulerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vine_client::ClientError> {
//!     let client = SchedulerClient::new("http://localhost:8080/api/v1");
//!
//!     let status = client.get_status().await?;
//!     println!("running: {}", status.running);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod history;
mod scheduler;

pub use api::SchedulerApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Default base URL, including the API prefix
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// HTTP client for the scheduler API
///
/// Endpoints are grouped by concern:
/// - Scheduler lifecycle (status, start, stop, config, run-now)
/// - Execution history (paged history, latest executions)
#[derive(Debug, Clone)]
pub struct SchedulerClient {
    /// Base URL including the API prefix (e.g., "http://localhost:8080/api/v1")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl SchedulerClient {
    /// Create a new scheduler client
    ///
    /// # Example
    /// ```
    /// use vine_client::SchedulerClient;
    ///
    /// let client = SchedulerClient::new("http://localhost:8080/api/v1");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new scheduler client with a custom HTTP client
    ///
    /// This is how the request timeout is applied.
    ///
    /// # Example
    /// ```
    /// use vine_client::SchedulerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = SchedulerClient::with_client("http://localhost:8080/api/v1", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the scheduler API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let body = self.checked_body(response).await?;

        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code and return the body as plain text
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        self.checked_body(response).await
    }

    async fn checked_body(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .ok()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }
}

impl Default for SchedulerClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SchedulerClient::new("http://localhost:8080/api/v1");
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = SchedulerClient::new("http://localhost:8080/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(
            client.url("/scheduler/status"),
            "http://localhost:8080/api/v1/scheduler/status"
        );
    }

    #[test]
    fn test_default_client() {
        assert_eq!(SchedulerClient::default().base_url(), DEFAULT_BASE_URL);
    }
}
