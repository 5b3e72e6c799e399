//! Scheduler lifecycle endpoints

use tracing::debug;
use vine_core::domain::scheduler::SchedulerStatus;
use vine_core::dto::scheduler::SchedulerConfig;

use crate::SchedulerClient;
use crate::error::Result;

impl SchedulerClient {
    // =============================================================================
    // Scheduler Status
    // =============================================================================

    /// Get the current scheduler status
    ///
    /// `next_run_time` is dropped when the scheduler reports it is not running.
    pub async fn get_status(&self) -> Result<SchedulerStatus> {
        let url = self.url("/scheduler/status");
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let status: SchedulerStatus = self.handle_response(response).await?;
        Ok(status.normalized())
    }

    // =============================================================================
    // Scheduler Commands
    // =============================================================================

    /// Start periodic runs with the given interval
    ///
    /// # Arguments
    /// * `interval_minutes` - Minutes between two runs
    ///
    /// # Returns
    /// The scheduler status after the command
    pub async fn start(&self, interval_minutes: u32) -> Result<SchedulerStatus> {
        let url = self.url("/scheduler/start");
        debug!("POST {} (intervalMinutes={})", url, interval_minutes);
        let response = self
            .client
            .post(&url)
            .query(&[("intervalMinutes", interval_minutes)])
            .send()
            .await?;

        let status: SchedulerStatus = self.handle_response(response).await?;
        Ok(status.normalized())
    }

    /// Stop periodic runs
    ///
    /// Stopping an already stopped scheduler is forwarded as-is; the returned
    /// status reflects whatever the service decided.
    pub async fn stop(&self) -> Result<SchedulerStatus> {
        let url = self.url("/scheduler/stop");
        debug!("POST {}", url);
        let response = self.client.post(&url).send().await?;

        let status: SchedulerStatus = self.handle_response(response).await?;
        Ok(status.normalized())
    }

    /// Update interval, enabled flag and start time for future runs
    pub async fn update_config(&self, config: &SchedulerConfig) -> Result<SchedulerStatus> {
        let url = self.url("/scheduler/config");
        debug!("PUT {} {:?}", url, config);
        let response = self.client.put(&url).json(config).send().await?;

        let status: SchedulerStatus = self.handle_response(response).await?;
        Ok(status.normalized())
    }

    /// Trigger one out-of-band execution
    ///
    /// # Returns
    /// The service's acknowledgement text
    pub async fn run_now(&self) -> Result<String> {
        let url = self.url("/scheduler/run-now");
        debug!("POST {}", url);
        let response = self.client.post(&url).send().await?;

        self.handle_text_response(response).await
    }
}
