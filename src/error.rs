//! Error types for icewarden.
//!
//! Only synchronous failures live here. A crashed or cleanly exited adapter
//! is reported through logging and the notifier, never as an error value,
//! because nobody may be waiting on the child when it goes away.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for supervisor operations.
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// No ephemeral port could be obtained. Session start cannot proceed.
    #[error("Port allocation failed: {0}")]
    Allocation(String),

    /// The adapter process did not start.
    #[error("Failed to launch ICE adapter: {0}")]
    Launch(String),

    /// The settings file could not be read or holds invalid values.
    #[error("{0}")]
    Config(String),

    /// An OS call on an already running adapter failed.
    #[error("Process operation failed: {0}")]
    Process(String),
}

impl SupervisorError {
    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SupervisorError::Allocation(_) => exit_codes::ALLOCATION_FAILURE,
            SupervisorError::Launch(_) => exit_codes::LAUNCH_FAILURE,
            SupervisorError::Config(_) => exit_codes::USER_ERROR,
            SupervisorError::Process(_) => exit_codes::PROCESS_FAILURE,
        }
    }
}

/// Result type alias for supervisor operations.
pub type Result<T> = std::result::Result<T, SupervisorError>;
