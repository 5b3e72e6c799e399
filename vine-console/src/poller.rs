//! Status poller
//!
//! Keeps the latest scheduler status. Refreshed once when the console starts
//! and then every [`STATUS_POLL_INTERVAL`]. A failed poll leaves the previous
//! snapshot in place and is simply retried on the next tick.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::context::ConsoleContext;
use crate::error::Result;
use crate::notify::Notice;
use crate::stream::Refresh;

/// Fixed delay between two status polls
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Periodically reads the scheduler status into the console state
#[derive(Clone)]
pub struct StatusPoller {
    ctx: Arc<ConsoleContext>,
}

impl StatusPoller {
    pub(crate) fn new(ctx: Arc<ConsoleContext>) -> Self {
        Self { ctx }
    }

    /// Reads the status once
    ///
    /// On success the snapshot is replaced and the error cleared, unless a
    /// later-issued read already settled. On failure the previous snapshot
    /// stays available and the error is recorded.
    pub async fn refresh(&self) -> Result<Refresh> {
        let seq = self.ctx.state().status.begin();

        let result = self.ctx.api.get_status().await;

        let mut state = self.ctx.state();
        match result {
            Ok(status) => {
                let outcome = state.status.apply(seq, status);
                if outcome == Refresh::Superseded {
                    debug!("Discarding superseded status response #{}", seq);
                }
                Ok(outcome)
            }
            Err(e) => match state.status.fail(seq, e.message()) {
                Refresh::Applied => Err(e.into()),
                Refresh::Superseded => {
                    debug!("Discarding superseded status failure #{}: {}", seq, e);
                    Ok(Refresh::Superseded)
                }
            },
        }
    }

    /// Starts the polling loop
    ///
    /// The first tick fires one interval from now; the initial read is done by
    /// the controller before spawning.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Starting status poller (interval: {:?})",
                STATUS_POLL_INTERVAL
            );

            let mut ticker =
                time::interval_at(Instant::now() + STATUS_POLL_INTERVAL, STATUS_POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                debug!("Polling scheduler status");

                if let Err(e) = self.refresh().await {
                    if e.is_timeout() {
                        warn!("Status poll timed out, retrying next tick");
                    } else {
                        warn!("Status poll failed: {}", e);
                    }
                    self.ctx
                        .notify(Notice::error(format!("Failed to load scheduler status: {}", e.message())));
                }
            }
        })
    }
}
