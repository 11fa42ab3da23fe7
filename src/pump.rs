//! Background log pump for the adapter process.
//!
//! The pump runs on its own thread for the whole life of the child. It
//! forwards output lines to the [`OutputSink`] and, once the child is gone,
//! flushes what is left and reports the exit exactly once. It never restarts
//! the child and has no cancellation: it ends when the child ends.

use crate::process::{ChildHandle, OutputLine, ReadOutcome};
use crate::sink::OutputSink;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Upper bound on draining output after the child is gone. A grandchild that
/// inherited the pipes can keep them open indefinitely.
const FINAL_FLUSH_LIMIT: Duration = Duration::from_secs(5);

/// How the child ended, as seen by the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReport {
    /// Exit code `0`.
    Clean,
    /// Any other exit code, including negated signal numbers.
    Crashed(i32),
    /// The child is gone but no exit code could be read.
    Unknown,
}

impl ExitReport {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => ExitReport::Clean,
            Some(code) => ExitReport::Crashed(code),
            None => ExitReport::Unknown,
        }
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitReport::Clean => Some(0),
            ExitReport::Crashed(code) => Some(*code),
            ExitReport::Unknown => None,
        }
    }
}

/// Forwards child output until the child exits.
pub struct LogPump {
    child: Arc<dyn ChildHandle>,
    sink: Arc<dyn OutputSink>,
    poll_interval: Duration,
}

impl LogPump {
    pub fn new(
        child: Arc<dyn ChildHandle>,
        sink: Arc<dyn OutputSink>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            child,
            sink,
            poll_interval,
        }
    }

    /// Run the pump on a named background thread.
    ///
    /// `on_exit` is called exactly once, from the pump thread, after the
    /// final flush.
    pub fn spawn<F>(self, on_exit: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce(ExitReport) + Send + 'static,
    {
        thread::Builder::new()
            .name("ice-adapter-log-pump".to_string())
            .spawn(move || {
                let report = self.run();
                on_exit(report);
            })
    }

    /// Pump output on the current thread until the child exits.
    pub fn run(self) -> ExitReport {
        loop {
            match self.child.is_alive() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "lost track of ICE adapter, stopping log pump");
                    break;
                }
            }

            match self.child.read_output(self.poll_interval) {
                ReadOutcome::Lines(lines) => self.forward(&lines),
                // No new output yet.
                ReadOutcome::TimedOut | ReadOutcome::Closed => thread::sleep(self.poll_interval),
            }
        }

        self.flush();
        ExitReport::from_code(self.child.exit_code())
    }

    /// Drain output until both pipes reach end of file.
    fn flush(&self) {
        let deadline = Instant::now() + FINAL_FLUSH_LIMIT;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(
                    limit = ?FINAL_FLUSH_LIMIT,
                    "ICE adapter output still open after exit, dropping the rest"
                );
                return;
            }

            match self.child.read_output(remaining.min(self.poll_interval)) {
                ReadOutcome::Lines(lines) => self.forward(&lines),
                ReadOutcome::TimedOut => {}
                ReadOutcome::Closed => return,
            }
        }
    }

    fn forward(&self, lines: &[OutputLine]) {
        for line in lines {
            self.sink.line(line);
        }
    }
}
