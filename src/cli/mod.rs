//! CLI argument parsing for icewarden.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Icewarden: run and supervise the ICE adapter outside the game client.
///
/// The adapter gets a freshly allocated RPC port, its output is forwarded
/// to the log, and shutdown escalates from waiting to terminating to killing.
#[derive(Parser, Debug)]
#[command(name = "icewarden")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to ./icewarden.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for icewarden.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a free ephemeral loopback port.
    Port,

    /// Print the adapter command line without starting it.
    Command(CommandArgs),

    /// Start the adapter and supervise it.
    ///
    /// Prints the RPC port on stdout. Without `--for-secs` the adapter runs
    /// until it exits by itself.
    Run(RunArgs),
}

/// Identity the adapter negotiates for.
#[derive(Args, Debug, Clone)]
pub struct PlayerArgs {
    /// Numeric player id.
    #[arg(long)]
    pub id: i64,

    /// Player login name.
    #[arg(long)]
    pub login: String,
}

/// Arguments for the `command` command.
#[derive(Args, Debug)]
pub struct CommandArgs {
    #[command(flatten)]
    pub player: PlayerArgs,

    /// Use this RPC port instead of allocating one.
    #[arg(long)]
    pub rpc_port: Option<u16>,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub player: PlayerArgs,

    /// Close the adapter after this many seconds.
    #[arg(long)]
    pub for_secs: Option<u64>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
