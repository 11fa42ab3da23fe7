//! Settings struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings consumed by the supervisor.
///
/// This struct represents the contents of `icewarden.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // =========================================================================
    // Paths
    // =========================================================================
    /// Install directory holding `ice-adapter/`. When unset, the directory
    /// of the running executable is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib_dir: Option<PathBuf>,

    /// Directory the adapter writes its own logs to (`--log-directory`).
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,

    // =========================================================================
    // Launch
    // =========================================================================
    /// Extra adapter arguments, split on whitespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<String>,

    /// Runtime launcher used for the jar build of the adapter.
    #[serde(default = "default_java")]
    pub java: String,

    // =========================================================================
    // Timing
    // =========================================================================
    /// Seconds to wait in each stage of the shutdown escalation.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// Milliseconds the log pump waits for output per iteration.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lib_dir: None,
            log_directory: default_log_directory(),
            extra_args: None,
            java: default_java(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
