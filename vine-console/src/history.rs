//! History query engine
//!
//! Fetches pages of past executions. Filters are validated before any request
//! is built. A response is applied only while its filter is still the selected
//! one and no later request has settled.

use std::sync::Arc;
use tracing::debug;
use vine_core::domain::history::{HistoryFilter, HistoryPage};
use vine_core::validation;

use crate::context::ConsoleContext;
use crate::error::Result;
use crate::stream::Refresh;

#[derive(Clone)]
pub struct HistoryQueryEngine {
    ctx: Arc<ConsoleContext>,
}

impl HistoryQueryEngine {
    pub(crate) fn new(ctx: Arc<ConsoleContext>) -> Self {
        Self { ctx }
    }

    /// Fetches one page for `filter` and returns it verbatim
    ///
    /// Nothing is cached; every call is a fresh request.
    pub async fn query(&self, filter: &HistoryFilter) -> Result<HistoryPage> {
        filter.validate()?;
        Ok(self.ctx.api.get_history(filter).await?)
    }

    /// Fetches the most recent executions without touching the history state
    pub async fn latest(&self, limit: u32) -> Result<HistoryPage> {
        validation::validate_latest_limit(limit)?;
        Ok(self.ctx.api.get_latest_executions(limit).await?)
    }

    /// Loads the page for `filter` into the console state
    ///
    /// The response is dropped if the selected filter changed in the meantime
    /// or if a later request already settled.
    pub async fn load(&self, filter: HistoryFilter) -> Result<Refresh> {
        filter.validate()?;

        let seq = self.ctx.state().history.begin();

        let result = self.ctx.api.get_history(&filter).await;

        let mut state = self.ctx.state();
        if state.filter != filter {
            debug!(
                "Discarding history response #{} for stale filter {:?}",
                seq, filter
            );
            state.history.discard(seq);
            return Ok(Refresh::Superseded);
        }

        match result {
            Ok(page) => {
                let outcome = state.history.apply(seq, page);
                if outcome == Refresh::Superseded {
                    debug!("Discarding superseded history response #{}", seq);
                }
                Ok(outcome)
            }
            Err(e) => match state.history.fail(seq, e.message()) {
                Refresh::Applied => Err(e.into()),
                Refresh::Superseded => {
                    debug!("Discarding superseded history failure #{}: {}", seq, e);
                    Ok(Refresh::Superseded)
                }
            },
        }
    }
}
