//! Destination for adapter output lines.

use crate::process::{OutputLine, Stream};

/// Receives every line the adapter prints. Called from the log pump thread.
pub trait OutputSink: Send + Sync {
    fn line(&self, line: &OutputLine);
}

/// Render a line the way it appears in the host log.
pub fn format_line(line: &OutputLine) -> String {
    match line.stream {
        Stream::Stdout => format!("ICE: {}", line.text),
        Stream::Stderr => format!("ICE ERROR: {}", line.text),
    }
}

/// Forwards adapter output to `tracing`.
///
/// Both streams are logged at info level; the adapter writes ordinary
/// chatter to stderr as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn line(&self, line: &OutputLine) {
        tracing::info!(target: "ice_adapter", "{}", format_line(line));
    }
}
