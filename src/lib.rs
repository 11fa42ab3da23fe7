//! Icewarden: supervisor for the ICE adapter helper process.
//!
//! A game session needs an ICE adapter for NAT traversal. The host does not
//! speak ICE itself; it starts the adapter and talks to it over a local RPC
//! port. This crate owns that process:
//!
//! - **Port**: allocate a free loopback port before the adapter exists
//! - **Launch**: build the adapter command line with the port baked in
//! - **Pump**: drain the adapter's output on a background thread and report
//!   crash or clean exit
//! - **Supervisor**: tie it together and shut the adapter down by waiting,
//!   then terminating, then killing
//!
//! ```no_run
//! use icewarden::config::Settings;
//! use icewarden::launch::Player;
//! use icewarden::notify::LogNotifier;
//! use icewarden::supervisor::Supervisor;
//! use std::sync::Arc;
//!
//! let settings = Settings::default();
//! let mut supervisor = Supervisor::start(
//!     &Player::new(4711, "Dostya"),
//!     &settings,
//!     Arc::new(LogNotifier),
//! )?;
//! println!("adapter RPC on 127.0.0.1:{}", supervisor.rpc_port());
//! supervisor.close()?;
//! # Ok::<(), icewarden::error::SupervisorError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod launch;
pub mod logging;
pub mod notify;
pub mod port;
pub mod process;
pub mod pump;
pub mod sink;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod test_support;
