//! Scheduler command gateway
//!
//! Issues lifecycle commands to the scheduler service. Client-side
//! preconditions are checked first; a rejected command never reaches the
//! network. A failed command leaves every snapshot untouched. A successful
//! command reports which reads must be refreshed afterwards.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};
use vine_client::ClientError;
use vine_core::domain::scheduler::SchedulerStatus;
use vine_core::dto::scheduler::SchedulerConfig;
use vine_core::validation;

use crate::context::{ConsoleContext, PendingCommand};
use crate::error::Result;

/// Lifecycle commands accepted by the scheduler service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandKind {
    Start,
    Stop,
    UpdateConfig,
    RunNow,
}

impl CommandKind {
    /// Reads made stale by a successful command
    pub fn invalidation(&self) -> Invalidation {
        match self {
            Self::RunNow => Invalidation {
                status: true,
                history: true,
            },
            Self::Start | Self::Stop | Self::UpdateConfig => Invalidation {
                status: true,
                history: false,
            },
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Start => "Scheduler started successfully.",
            Self::Stop => "Scheduler stopped successfully.",
            Self::UpdateConfig => "Scheduler configuration updated successfully.",
            Self::RunNow => "Job triggered successfully.",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Start => "Failed to start scheduler",
            Self::Stop => "Failed to stop scheduler",
            Self::UpdateConfig => "Failed to update scheduler configuration",
            Self::RunNow => "Failed to trigger job manually",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::UpdateConfig => "update-config",
            Self::RunNow => "run-now",
        };
        f.write_str(name)
    }
}

/// Reads to refresh after a command succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub status: bool,
    pub history: bool,
}

/// Sends lifecycle commands and folds their responses into the console state
#[derive(Clone)]
pub struct CommandGateway {
    ctx: Arc<ConsoleContext>,
}

impl CommandGateway {
    pub(crate) fn new(ctx: Arc<ConsoleContext>) -> Self {
        Self { ctx }
    }

    /// Starts periodic runs every `interval_minutes`
    pub async fn start(&self, interval_minutes: u32) -> Result<Invalidation> {
        validation::validate_start_interval(interval_minutes)?;

        let status = self
            .submit(CommandKind::Start, self.ctx.api.start(interval_minutes))
            .await?;
        self.reconcile(status);

        info!("Scheduler started (interval: {} min)", interval_minutes);
        Ok(CommandKind::Start.invalidation())
    }

    /// Stops periodic runs
    ///
    /// Forwarded even when the scheduler already looks stopped.
    pub async fn stop(&self) -> Result<Invalidation> {
        let status = self.submit(CommandKind::Stop, self.ctx.api.stop()).await?;
        self.reconcile(status);

        info!("Scheduler stopped");
        Ok(CommandKind::Stop.invalidation())
    }

    /// Updates interval, enabled flag and start time for future runs
    pub async fn update_config(&self, config: &SchedulerConfig) -> Result<Invalidation> {
        config.validate()?;

        let status = self
            .submit(CommandKind::UpdateConfig, self.ctx.api.update_config(config))
            .await?;
        self.reconcile(status);

        info!(
            "Scheduler configuration updated (enabled: {}, interval: {} min, start: {})",
            config.enabled,
            config.interval_minutes,
            config.start_from_time.as_deref().unwrap_or("-")
        );
        Ok(CommandKind::UpdateConfig.invalidation())
    }

    /// Triggers one execution outside the periodic schedule
    pub async fn run_now(&self) -> Result<Invalidation> {
        let ack = self
            .submit(CommandKind::RunNow, self.ctx.api.run_now())
            .await?;

        info!("Job triggered: {}", ack.trim());
        Ok(CommandKind::RunNow.invalidation())
    }

    /// Tracks the command as pending while `call` is outstanding
    ///
    /// The pending entry is released even if this future is dropped mid-call.
    async fn submit<T, F>(&self, kind: CommandKind, call: F) -> Result<T>
    where
        F: Future<Output = vine_client::Result<T>>,
    {
        let mut pending = PendingCommand::begin(&self.ctx, kind);

        let result = call.await;

        let error = result.as_ref().err().map(ClientError::message);
        if let Some(message) = &error {
            warn!("Command {} failed: {}", kind, message);
        }
        pending.settle(error);
        drop(pending);

        Ok(result?)
    }

    /// Status returned by a command is newer than any read in flight
    fn reconcile(&self, status: SchedulerStatus) {
        self.ctx.state().status.replace(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidation_per_command() {
        assert_eq!(
            CommandKind::RunNow.invalidation(),
            Invalidation {
                status: true,
                history: true
            }
        );
        for kind in [CommandKind::Start, CommandKind::Stop, CommandKind::UpdateConfig] {
            let invalidation = kind.invalidation();
            assert!(invalidation.status);
            assert!(!invalidation.history);
        }
    }

    #[test]
    fn test_command_names() {
        assert_eq!(CommandKind::UpdateConfig.to_string(), "update-config");
        assert_eq!(CommandKind::RunNow.to_string(), "run-now");
    }
}
