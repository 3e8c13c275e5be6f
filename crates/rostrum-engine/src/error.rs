//! Error types for the session engine.

use thiserror::Error;

/// Result type for session engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while applying a session operation.
///
/// Every failure is recoverable: the session continues and no event is
/// broadcast for the failed operation. Invalid numeric input from clients is
/// not an error at all; it substitutes a documented default instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Final-score computation needs at least one submitted score.
    #[error(transparent)]
    Scoring(#[from] rostrum_scoring::ScoringError),
}
