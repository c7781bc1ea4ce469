//! Error types for player construction.

use thiserror::Error;

/// Errors that can occur when building a player.
///
/// Once built, a player never fails: `run()` and `reset()` are total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The workflow has no steps to play.
    #[error("Workflow '{0}' has no steps")]
    EmptyWorkflow(String),
}

/// Type alias for Result with PlayerError.
pub type PlayerResult<T> = Result<T, PlayerError>;
