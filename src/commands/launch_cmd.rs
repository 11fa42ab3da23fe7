//! Implementation of the `icewarden command` command.
//!
//! Shows the exact adapter command line without starting anything.

use crate::cli::CommandArgs;
use icewarden::config::Settings;
use icewarden::error::Result;
use icewarden::launch::{LaunchSpec, Player};
use icewarden::port::allocate_port;

/// Execute the `icewarden command` command.
pub fn cmd_command(args: CommandArgs, settings: &Settings) -> Result<()> {
    println!("{}", render_command(args, settings)?);
    Ok(())
}

/// Build the launch spec for `args` and render it as a single line.
///
/// A port is allocated unless `--rpc-port` was given.
fn render_command(args: CommandArgs, settings: &Settings) -> Result<String> {
    let rpc_port = match args.rpc_port {
        Some(port) => port,
        None => allocate_port()?,
    };

    let player: Player = args.player.into();
    let spec = LaunchSpec::build(&player, rpc_port, settings);
    Ok(spec.to_string())
}
