//! The capability set of a running child.

use crate::error::Result;
use std::time::Duration;

/// Which pipe a line of output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// One line of child output, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: Stream,
    pub text: String,
}

impl OutputLine {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            stream: Stream::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            stream: Stream::Stderr,
            text: text.into(),
        }
    }
}

/// Result of a bounded output read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// At least one line became available.
    Lines(Vec<OutputLine>),
    /// Nothing arrived within the wait. Not an error.
    TimedOut,
    /// Both output pipes reached end of file.
    Closed,
}

/// A running child process.
///
/// Implementations must be shareable between the supervisor (which owns the
/// handle) and the log pump (which holds a clone for its lifetime).
pub trait ChildHandle: Send + Sync {
    /// OS process identifier. `0` means the process never got one.
    fn pid(&self) -> u32;

    /// Non-blocking liveness check.
    fn is_alive(&self) -> Result<bool>;

    /// Wait up to `timeout` for new output and return everything available.
    fn read_output(&self, timeout: Duration) -> ReadOutcome;

    /// Block up to `timeout` for the child to exit. Returns `true` once it has.
    fn wait_timeout(&self, timeout: Duration) -> Result<bool>;

    /// Ask the child to shut down. It may ignore the request.
    fn terminate(&self) -> Result<()>;

    /// Force the child down and reap it.
    fn kill(&self) -> Result<()>;

    /// Exit code once the child has exited.
    ///
    /// On Unix a child ended by a signal reports the negated signal number.
    fn exit_code(&self) -> Option<i32>;
}
