//! Settings for the ICE adapter supervisor.
//!
//! This module defines the `Settings` struct that represents `icewarden.yaml`.
//! Parsing is forward-compatible (unknown fields are ignored), every field
//! has a default, and values are validated after loading. The core never
//! reads settings on its own; callers pass a `Settings` value in explicitly.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Settings;
pub use types::DEFAULT_SETTINGS_FILE;
