//! Execution history endpoints

use tracing::debug;
use vine_core::domain::history::{HistoryFilter, HistoryPage};

use crate::SchedulerClient;
use crate::error::Result;

impl SchedulerClient {
    /// Get one page of past executions
    ///
    /// The filter is sent as-is; range checks belong to the caller. An
    /// out-of-range page comes back empty rather than as an error.
    ///
    /// # Arguments
    /// * `filter` - Page, page size and optional days window
    pub async fn get_history(&self, filter: &HistoryFilter) -> Result<HistoryPage> {
        let url = self.url("/scheduler/history");

        let mut query = vec![
            ("page", filter.page.to_string()),
            ("size", filter.page_size.to_string()),
        ];
        if let Some(days) = filter.days_window {
            query.push(("days", days.to_string()));
        }

        debug!("GET {} {:?}", url, query);
        let response = self.client.get(&url).query(&query).send().await?;

        self.handle_response(response).await
    }

    /// Get the most recent executions
    ///
    /// # Arguments
    /// * `limit` - Number of executions to return (the service accepts 1 to 50)
    pub async fn get_latest_executions(&self, limit: u32) -> Result<HistoryPage> {
        let url = self.url("/scheduler/history/latest");
        debug!("GET {} (limit={})", url, limit);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
