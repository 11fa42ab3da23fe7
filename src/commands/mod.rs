//! Command implementations for icewarden.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations and resolves the settings every command shares.

mod launch_cmd;
mod port;
mod run;

use crate::cli::{Command, PlayerArgs};
use icewarden::config::Settings;
use icewarden::error::Result;
use icewarden::launch::Player;
use std::path::Path;

pub use launch_cmd::cmd_command;
pub use port::cmd_port;
pub use run::cmd_run;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, config: Option<&Path>) -> Result<()> {
    match command {
        Command::Port => cmd_port(),
        Command::Command(args) => cmd_command(args, &load_settings(config)?),
        Command::Run(args) => cmd_run(args, &load_settings(config)?),
    }
}

/// Load the settings file named on the command line, or the implicit one.
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    Settings::resolve(config)
}

impl From<PlayerArgs> for Player {
    fn from(args: PlayerArgs) -> Self {
        Player::new(args.id, args.login)
    }
}
