//! Implementation of the `icewarden port` command.

use icewarden::error::Result;
use icewarden::port::allocate_port;

/// Execute the `icewarden port` command.
///
/// Prints a port that was free at the time of the call (for scripting).
pub fn cmd_port() -> Result<()> {
    println!("{}", allocate_port()?);
    Ok(())
}
