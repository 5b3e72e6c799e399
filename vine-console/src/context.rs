//! Console context
//!
//! Shared state owned by the controller and handed to the poller, the history
//! engine and the command gateway. Built when the console starts and dropped
//! when it shuts down.
//!
//! The state lock is only held for synchronous merges and never across a
//! request, so validation, merging and invalidation decisions cannot
//! interleave with each other.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vine_client::SchedulerApi;
use vine_core::domain::history::{HistoryFilter, HistoryPage};
use vine_core::domain::scheduler::SchedulerStatus;

use crate::gateway::CommandKind;
use crate::notify::{Notice, Notifier};
use crate::stream::ReadStream;

/// Mutable console state
#[derive(Debug, Default)]
pub struct ConsoleState {
    pub status: ReadStream<SchedulerStatus>,
    pub history: ReadStream<HistoryPage>,
    /// Filter the history stream is currently showing
    pub filter: HistoryFilter,
    /// Commands submitted and not yet answered, by kind
    pub pending: BTreeMap<CommandKind, usize>,
    /// Failure of the most recent command, cleared by the next success
    pub command_error: Option<String>,
}

impl ConsoleState {
    pub fn new(filter: HistoryFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn begin_command(&mut self, kind: CommandKind) {
        *self.pending.entry(kind).or_default() += 1;
    }

    /// Records the outcome of an answered command
    pub fn end_command(&mut self, kind: CommandKind, error: Option<String>) {
        self.release_command(kind);
        self.command_error = error;
    }

    /// Drops one pending entry without touching `command_error`
    pub fn release_command(&mut self, kind: CommandKind) {
        if let Some(count) = self.pending.get_mut(&kind) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&kind);
            }
        }
    }
}

/// Marks a command as pending for as long as it is alive
///
/// Dropping the guard before [`PendingCommand::settle`] (the caller gave up on
/// the command) only clears the pending entry; the last command error stays.
pub(crate) struct PendingCommand<'a> {
    ctx: &'a ConsoleContext,
    kind: CommandKind,
    outcome: Option<Option<String>>,
}

impl<'a> PendingCommand<'a> {
    pub(crate) fn begin(ctx: &'a ConsoleContext, kind: CommandKind) -> Self {
        ctx.state().begin_command(kind);
        Self {
            ctx,
            kind,
            outcome: None,
        }
    }

    /// Records the answer; applied when the guard drops
    pub(crate) fn settle(&mut self, error: Option<String>) {
        self.outcome = Some(error);
    }
}

impl Drop for PendingCommand<'_> {
    fn drop(&mut self) {
        let mut state = self.ctx.state();
        match self.outcome.take() {
            Some(error) => state.end_command(self.kind, error),
            None => state.release_command(self.kind),
        }
    }
}

/// Collaborators and state shared by every console component
pub struct ConsoleContext {
    pub(crate) api: Arc<dyn SchedulerApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ConsoleState>,
}

impl ConsoleContext {
    pub fn new(
        api: Arc<dyn SchedulerApi>,
        notifier: Arc<dyn Notifier>,
        filter: HistoryFilter,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            notifier,
            state: Mutex::new(ConsoleState::new(filter)),
        })
    }

    /// Locks the state for a synchronous update
    pub(crate) fn state(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }
}
