//! User-facing notification of critical failures.
//!
//! The host decides how a critical failure reaches the user (a dialog, a
//! toast, a console line). The supervisor only knows this capability.

/// Title used for every adapter notification.
pub const NOTIFICATION_TITLE: &str = "ICE adapter error";

/// Receives critical failures the user has to know about.
pub trait Notifier: Send + Sync {
    fn notify_critical(&self, title: &str, message: &str);
}

/// Notifier that writes critical failures to the error log.
///
/// Used by the CLI, where the log already is the user interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_critical(&self, title: &str, message: &str) {
        tracing::error!(title, "{}", message);
    }
}
