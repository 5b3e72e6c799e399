//! VINE Scheduler Console
//!
//! Client-side control of the VINE scheduler service: a synchronized view of
//! the remote scheduler plus the commands that change it.
//!
//! Architecture:
//! - Context: shared state and collaborators, owned by the controller
//! - Poller: periodic status reads with stale-response protection
//! - History: validated, filter-aware history queries
//! - Gateway: lifecycle commands (start, stop, update-config, run-now)
//! - Controller: composes the above and refreshes reads after commands
//!
//! Requests never race each other into the state: every read carries a
//! sequence number and only the newest settled one is visible.

pub mod config;
mod context;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod history;
pub mod notify;
pub mod poller;
pub mod stream;

pub use config::ConsoleConfig;
pub use controller::{ControllerPhase, SchedulerController, ViewSnapshot};
pub use error::{ConsoleError, Result};
pub use gateway::{CommandGateway, CommandKind, Invalidation};
pub use history::HistoryQueryEngine;
pub use notify::{ChannelNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use poller::{STATUS_POLL_INTERVAL, StatusPoller};
pub use stream::{ReadStream, Refresh};
