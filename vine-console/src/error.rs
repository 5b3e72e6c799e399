//! Error types for the console

use thiserror::Error;
use vine_client::ClientError;
use vine_core::validation::ValidationError;

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Failures surfaced to presentation code
///
/// A response discarded because a newer request superseded it is not an
/// error; see [`crate::Refresh::Superseded`].
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Input rejected before any request was issued
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The scheduler service failed or could not be reached
    #[error(transparent)]
    Remote(#[from] ClientError),
}

impl ConsoleError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Whether the request hit the transport timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_timeout())
    }

    /// Offending field for validation failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(e) => Some(e.field),
            Self::Remote(_) => None,
        }
    }

    /// Human-readable message for notifications
    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.message.clone(),
            Self::Remote(e) => e.message(),
        }
    }
}
