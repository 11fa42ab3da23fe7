//! Launch command assembly for the ICE adapter.
//!
//! This module turns a player identity, an allocated RPC port and the
//! settings into an immutable [`LaunchSpec`]:
//!
//! - **Platform**: picks the native binary or the jar plus a runtime launcher
//! - **Args**: tokenizes the user's extra argument string
//! - **Spec**: fixed adapter flags in their required order

mod args;
mod platform;
mod spec;

// Re-export public API
pub use args::tokenize_extra_args;
pub use platform::{ADAPTER_DIR, Executable, Platform};
pub use spec::{GPGNET_PORT, LOG_LEVEL, LaunchSpec, Player};
