//! Scheduler API abstraction
//!
//! The console depends on this trait rather than on [`SchedulerClient`] so the
//! transport can be swapped for a test double.

use async_trait::async_trait;
use vine_core::domain::history::{HistoryFilter, HistoryPage};
use vine_core::domain::scheduler::SchedulerStatus;
use vine_core::dto::scheduler::SchedulerConfig;

use crate::SchedulerClient;
use crate::error::Result;

/// Operations offered by the remote scheduler service
#[async_trait]
pub trait SchedulerApi: Send + Sync {
    /// `GET /scheduler/status`
    async fn get_status(&self) -> Result<SchedulerStatus>;

    /// `POST /scheduler/start?intervalMinutes={n}`
    async fn start(&self, interval_minutes: u32) -> Result<SchedulerStatus>;

    /// `POST /scheduler/stop`
    async fn stop(&self) -> Result<SchedulerStatus>;

    /// `PUT /scheduler/config`
    async fn update_config(&self, config: &SchedulerConfig) -> Result<SchedulerStatus>;

    /// `POST /scheduler/run-now`, returns the acknowledgement text
    async fn run_now(&self) -> Result<String>;

    /// `GET /scheduler/history?page={p}&size={s}[&days={d}]`
    async fn get_history(&self, filter: &HistoryFilter) -> Result<HistoryPage>;

    /// `GET /scheduler/history/latest?limit={n}`
    async fn get_latest_executions(&self, limit: u32) -> Result<HistoryPage>;
}

#[async_trait]
impl SchedulerApi for SchedulerClient {
    async fn get_status(&self) -> Result<SchedulerStatus> {
        SchedulerClient::get_status(self).await
    }

    async fn start(&self, interval_minutes: u32) -> Result<SchedulerStatus> {
        SchedulerClient::start(self, interval_minutes).await
    }

    async fn stop(&self) -> Result<SchedulerStatus> {
        SchedulerClient::stop(self).await
    }

    async fn update_config(&self, config: &SchedulerConfig) -> Result<SchedulerStatus> {
        SchedulerClient::update_config(self, config).await
    }

    async fn run_now(&self) -> Result<String> {
        SchedulerClient::run_now(self).await
    }

    async fn get_history(&self, filter: &HistoryFilter) -> Result<HistoryPage> {
        SchedulerClient::get_history(self, filter).await
    }

    async fn get_latest_executions(&self, limit: u32) -> Result<HistoryPage> {
        SchedulerClient::get_latest_executions(self, limit).await
    }
}
