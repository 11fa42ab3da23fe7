//! Defaults and constants used by the `Settings` struct.

use std::path::PathBuf;

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_SETTINGS_FILE: &str = "icewarden.yaml";

pub(crate) fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

pub(crate) fn default_java() -> String {
    "java".to_string()
}

/// Per-stage wait used by the shutdown escalation.
pub(crate) fn default_shutdown_timeout_secs() -> u64 {
    300
}

/// Bounded read wait (and pause) of the log pump.
pub(crate) fn default_poll_interval_ms() -> u64 {
    100
}
