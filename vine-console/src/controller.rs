//! Scheduler controller
//!
//! Composition root of the console. Combines the status poller, the history
//! engine and the command gateway into one view and one set of actions for
//! presentation code, and refreshes reads after successful commands.
//!
//! Lifecycle: [`SchedulerController::new`] builds the context,
//! [`SchedulerController::start`] performs the initial reads and spawns the
//! poller, [`SchedulerController::shutdown`] (or drop) cancels it.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use vine_client::SchedulerApi;
use vine_core::domain::history::{HistoryFilter, HistoryPage};
use vine_core::domain::scheduler::SchedulerStatus;
use vine_core::dto::scheduler::SchedulerConfig;

use crate::context::ConsoleContext;
use crate::error::{ConsoleError, Result};
use crate::gateway::{CommandGateway, CommandKind, Invalidation};
use crate::history::HistoryQueryEngine;
use crate::notify::{Notice, Notifier};
use crate::poller::StatusPoller;
use crate::stream::Refresh;

/// Where the console is in its startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// No status read issued yet
    Uninitialized,
    /// Waiting for the first successful status read
    Loading,
    /// A status snapshot is available
    Ready,
}

/// Consistent copy of everything presentation code renders
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub phase: ControllerPhase,
    pub status: Option<SchedulerStatus>,
    pub history: Option<HistoryPage>,
    pub filter: HistoryFilter,
    pub status_fetching: bool,
    pub history_fetching: bool,
    pub pending_commands: Vec<CommandKind>,
    pub status_error: Option<String>,
    pub history_error: Option<String>,
    pub command_error: Option<String>,
}

impl ViewSnapshot {
    /// Whether any error flag is raised
    pub fn has_error(&self) -> bool {
        self.status_error.is_some() || self.history_error.is_some() || self.command_error.is_some()
    }

    pub fn is_pending(&self, kind: CommandKind) -> bool {
        self.pending_commands.contains(&kind)
    }
}

pub struct SchedulerController {
    ctx: Arc<ConsoleContext>,
    poller: StatusPoller,
    history: HistoryQueryEngine,
    gateway: CommandGateway,
    poll_task: Option<JoinHandle<()>>,
}

impl SchedulerController {
    /// Builds the console context; nothing is fetched yet
    pub fn new(
        api: Arc<dyn SchedulerApi>,
        notifier: Arc<dyn Notifier>,
        filter: HistoryFilter,
    ) -> Self {
        let ctx = ConsoleContext::new(api, notifier, filter);
        Self {
            poller: StatusPoller::new(Arc::clone(&ctx)),
            history: HistoryQueryEngine::new(Arc::clone(&ctx)),
            gateway: CommandGateway::new(Arc::clone(&ctx)),
            ctx,
            poll_task: None,
        }
    }

    /// Performs the initial status and history reads
    ///
    /// Failures are reported and recorded; the controller stays usable.
    pub async fn initialize(&self) {
        let filter = self.ctx.state().filter;
        let _ = tokio::join!(self.refresh_status(), self.load_history(filter));
    }

    /// Continuous status polling plus the initial reads
    ///
    /// The poller is spawned first, so a slow initial read never delays it.
    /// Calling it again while the poller runs does nothing.
    pub async fn start(&mut self) {
        if self.poll_task.is_some() {
            return;
        }

        info!("Starting scheduler console");
        self.poll_task = Some(self.poller.clone().spawn());
        self.initialize().await;
    }

    /// Cancels the poller
    pub fn shutdown(mut self) {
        self.stop_polling();
    }

    fn stop_polling(&mut self) {
        if let Some(handle) = self.poll_task.take() {
            info!("Stopping status poller");
            handle.abort();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll_task.is_some()
    }

    // =============================================================================
    // Reads
    // =============================================================================

    /// Reads the status now, outside the polling schedule
    pub async fn refresh_status(&self) -> Result<Refresh> {
        self.poller.refresh().await.inspect_err(|e| {
            self.ctx.notify(Notice::error(format!(
                "Failed to load scheduler status: {}",
                e.message()
            )))
        })
    }

    /// Reloads the history for the selected filter
    pub async fn refresh_history(&self) -> Result<Refresh> {
        let filter = self.ctx.state().filter;
        self.load_history(filter).await
    }

    /// Replaces the selected filter and loads its first result
    ///
    /// An invalid filter is rejected without touching the current selection.
    pub async fn set_filter(&self, filter: HistoryFilter) -> Result<Refresh> {
        if let Err(e) = filter.validate() {
            let err = ConsoleError::from(e);
            self.report_invalid(&err);
            return Err(err);
        }

        self.ctx.state().filter = filter;
        debug!("History filter changed to {:?}", filter);
        self.load_history(filter).await
    }

    /// Applies `change` to the selected filter, see [`Self::set_filter`]
    pub async fn update_filter<F>(&self, change: F) -> Result<Refresh>
    where
        F: FnOnce(HistoryFilter) -> HistoryFilter,
    {
        let filter = change(self.ctx.state().filter);
        self.set_filter(filter).await
    }

    pub async fn set_page(&self, page: i64) -> Result<Refresh> {
        self.update_filter(|f| f.with_page(page)).await
    }

    pub async fn set_page_size(&self, page_size: i64) -> Result<Refresh> {
        self.update_filter(|f| f.with_page_size(page_size)).await
    }

    /// Changes the days window; always goes back to the first page
    pub async fn set_days_window(&self, days_window: Option<i64>) -> Result<Refresh> {
        self.update_filter(|f| f.with_days_window(days_window)).await
    }

    /// Stateless page query, see [`HistoryQueryEngine::query`]
    pub async fn query_history(&self, filter: &HistoryFilter) -> Result<HistoryPage> {
        self.history
            .query(filter)
            .await
            .inspect_err(|e| self.report_history_error(e))
    }

    /// Most recent executions, not stored in the history state
    pub async fn latest(&self, limit: u32) -> Result<HistoryPage> {
        self.history.latest(limit).await.inspect_err(|e| {
            if e.is_validation() {
                self.report_invalid(e);
            } else {
                self.ctx.notify(Notice::error(format!(
                    "Failed to fetch latest executions: {}",
                    e.message()
                )));
            }
        })
    }

    async fn load_history(&self, filter: HistoryFilter) -> Result<Refresh> {
        self.history
            .load(filter)
            .await
            .inspect_err(|e| self.report_history_error(e))
    }

    fn report_history_error(&self, err: &ConsoleError) {
        if err.is_validation() {
            self.report_invalid(err);
        } else {
            self.ctx.notify(Notice::error(format!(
                "Failed to load job history: {}",
                err.message()
            )));
        }
    }

    // =============================================================================
    // Commands
    // =============================================================================

    /// Starts periodic runs, then refreshes the status
    pub async fn start_scheduler(&self, interval_minutes: u32) -> Result<()> {
        let outcome = self.gateway.start(interval_minutes).await;
        self.finish(CommandKind::Start, outcome).await
    }

    /// Stops periodic runs, then refreshes the status
    pub async fn stop_scheduler(&self) -> Result<()> {
        let outcome = self.gateway.stop().await;
        self.finish(CommandKind::Stop, outcome).await
    }

    /// Updates the configuration for future runs, then refreshes the status
    pub async fn update_config(&self, config: SchedulerConfig) -> Result<()> {
        let outcome = self.gateway.update_config(&config).await;
        self.finish(CommandKind::UpdateConfig, outcome).await
    }

    /// Triggers one execution, then refreshes status and the first history page
    pub async fn run_now(&self) -> Result<()> {
        let outcome = self.gateway.run_now().await;
        self.finish(CommandKind::RunNow, outcome).await
    }

    /// Reports the command outcome and runs the post-command reads
    ///
    /// Only reached once the command response was observed. A failed command
    /// triggers no reads.
    async fn finish(&self, kind: CommandKind, outcome: Result<Invalidation>) -> Result<()> {
        let invalidation = match outcome {
            Ok(invalidation) => invalidation,
            Err(e) => {
                if e.is_validation() {
                    self.report_invalid(&e);
                } else {
                    self.ctx.notify(Notice::error(format!(
                        "{}: {}",
                        kind.failure_message(),
                        e.message()
                    )));
                }
                return Err(e);
            }
        };

        self.ctx.notify(Notice::success(kind.success_message()));
        self.invalidate(invalidation).await;
        Ok(())
    }

    /// Re-reads what a command made stale; failures are reported, not returned
    async fn invalidate(&self, invalidation: Invalidation) {
        let status = async {
            if invalidation.status {
                let _ = self.refresh_status().await;
            }
        };

        let history = async {
            if invalidation.history {
                let filter = {
                    let mut state = self.ctx.state();
                    state.filter = state.filter.first_page();
                    state.filter
                };
                let _ = self.load_history(filter).await;
            }
        };

        tokio::join!(status, history);
    }

    fn report_invalid(&self, err: &ConsoleError) {
        let field = err.field().unwrap_or("input");
        self.ctx
            .notify(Notice::error(format!("Invalid {}: {}", field, err.message())));
    }

    // =============================================================================
    // View
    // =============================================================================

    /// Copies the current state for rendering
    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.ctx.state();

        let phase = if state.status.value().is_some() {
            ControllerPhase::Ready
        } else if state.status.is_started() {
            ControllerPhase::Loading
        } else {
            ControllerPhase::Uninitialized
        };

        ViewSnapshot {
            phase,
            status: state.status.value().cloned(),
            history: state.history.value().cloned(),
            filter: state.filter,
            status_fetching: state.status.is_fetching(),
            history_fetching: state.history.is_fetching(),
            pending_commands: state.pending.keys().copied().collect(),
            status_error: state.status.error().map(str::to_string),
            history_error: state.history.error().map(str::to_string),
            command_error: state.command_error.clone(),
        }
    }

    pub fn phase(&self) -> ControllerPhase {
        self.snapshot().phase
    }

    pub fn filter(&self) -> HistoryFilter {
        self.ctx.state().filter
    }
}

impl Drop for SchedulerController {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
