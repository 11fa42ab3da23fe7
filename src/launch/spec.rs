//! The immutable launch description of one adapter process.

use super::args::tokenize_extra_args;
use super::platform::{Executable, Platform};
use crate::config::Settings;
use std::fmt;
use std::path::{Path, PathBuf};

/// Secondary (GPGNet) port handed to the adapter. `0` lets the adapter pick.
pub const GPGNET_PORT: u16 = 0;

/// Verbosity the adapter is always started with.
pub const LOG_LEVEL: &str = "debug";

/// Identity of the local player the adapter negotiates for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub login: String,
}

impl Player {
    pub fn new(id: i64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
        }
    }
}

/// Everything needed to spawn the adapter.
///
/// Built once per supervisor and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    program: PathBuf,
    args: Vec<String>,
    log_directory: PathBuf,
    extra_args: Vec<String>,
}

impl LaunchSpec {
    /// Build the launch spec for the host platform.
    pub fn build(player: &Player, rpc_port: u16, settings: &Settings) -> Self {
        Self::build_for(Platform::current(), player, rpc_port, settings)
    }

    /// Build the launch spec for an explicit platform.
    ///
    /// Argument order: platform leading args (`-jar <path>`), the fixed
    /// adapter flags, then the user's extra arguments.
    pub fn build_for(
        platform: Platform,
        player: &Player,
        rpc_port: u16,
        settings: &Settings,
    ) -> Self {
        let exe = Executable::resolve(platform, &settings.resolved_lib_dir(), &settings.java);
        let log_directory = settings.log_directory.clone();

        let mut args = exe.leading_args;
        args.extend([
            "--id".to_string(),
            player.id.to_string(),
            "--login".to_string(),
            player.login.clone(),
            "--rpc-port".to_string(),
            rpc_port.to_string(),
            "--gpgnet-port".to_string(),
            GPGNET_PORT.to_string(),
            "--log-level".to_string(),
            LOG_LEVEL.to_string(),
            "--debug-window".to_string(),
            "--log-directory".to_string(),
            log_directory.to_string_lossy().into_owned(),
        ]);

        let extra_args = settings
            .extra_args
            .as_deref()
            .map(tokenize_extra_args)
            .unwrap_or_default();

        Self {
            program: exe.program,
            args,
            log_directory,
            extra_args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument list in spawn order, extra arguments last.
    pub fn args(&self) -> Vec<&str> {
        self.args
            .iter()
            .chain(self.extra_args.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }
}

impl fmt::Display for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
