//! Ephemeral port allocation for the adapter's RPC server.
//!
//! The port is picked before the adapter exists so it can be passed on the
//! command line. The listener is released right away; another socket could
//! grab the port before the adapter binds it, which is an accepted race.

use crate::error::{Result, SupervisorError};
use std::net::{Ipv4Addr, TcpListener};

/// Ask the OS for a free loopback TCP port and release it again.
pub fn allocate_port() -> Result<u16> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).map_err(|e| {
        SupervisorError::Allocation(format!("failed to bind an ephemeral loopback port: {}", e))
    })?;

    let port = listener
        .local_addr()
        .map_err(|e| {
            SupervisorError::Allocation(format!("failed to read back the assigned port: {}", e))
        })?
        .port();

    drop(listener);
    tracing::debug!(port, "allocated RPC port");
    Ok(port)
}
