//! Settings loading, validation, and utility operations.

use super::model::Settings;
use super::types::DEFAULT_SETTINGS_FILE;
use crate::error::{Result, SupervisorError};
use std::path::{Path, PathBuf};
use std::time::Duration;

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Successfully loaded and validated settings
    /// * `Err(SupervisorError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SupervisorError::Config(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load settings from `path` if it exists, otherwise fall back to defaults.
    ///
    /// Used for the implicit settings file; an explicitly requested file that
    /// is missing goes through [`Settings::load`] and fails.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Settings for a command line that may name a settings file.
    ///
    /// An explicitly named file must exist; the implicit
    /// [`DEFAULT_SETTINGS_FILE`] in the working directory is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::load_or_default(DEFAULT_SETTINGS_FILE),
        }
    }

    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml).map_err(|e| {
            SupervisorError::Config(format!("failed to parse settings YAML: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SupervisorError::Config(format!("failed to serialize settings to YAML: {}", e))
        })
    }

    /// Validate settings values.
    ///
    /// Validation rules:
    /// - `shutdown_timeout_secs` must be positive
    /// - `poll_interval_ms` must be positive
    /// - `java` must not be blank
    pub fn validate(&self) -> Result<()> {
        if self.shutdown_timeout_secs == 0 {
            return Err(SupervisorError::Config(
                "settings validation failed: shutdown_timeout_secs must be greater than 0"
                    .to_string(),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(SupervisorError::Config(
                "settings validation failed: poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.java.trim().is_empty() {
            return Err(SupervisorError::Config(
                "settings validation failed: java must name a launcher executable".to_string(),
            ));
        }

        Ok(())
    }

    /// Per-stage wait of the shutdown escalation.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Bounded read wait of the log pump.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Install directory of the bundled adapter.
    ///
    /// Falls back to the directory containing the running executable, then
    /// to the current directory.
    pub fn resolved_lib_dir(&self) -> PathBuf {
        if let Some(dir) = &self.lib_dir {
            return dir.clone();
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
