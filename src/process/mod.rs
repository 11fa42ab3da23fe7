//! Child process handling for the ICE adapter.
//!
//! - **Handle**: the [`ChildHandle`] capability set the supervisor and the
//!   log pump work against
//! - **OS**: [`OsChild`], a real process with captured output pipes
//! - **Spawner**: turns a [`LaunchSpec`](crate::launch::LaunchSpec) into a handle

mod handle;
mod os;
mod signal;
mod spawner;

// Re-export public API
pub use handle::{ChildHandle, OutputLine, ReadOutcome, Stream};
pub use os::OsChild;
pub use spawner::{OsSpawner, Spawner};
