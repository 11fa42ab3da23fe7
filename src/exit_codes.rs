//! Exit code constants for the icewarden CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: No ephemeral port could be allocated
//! - 3: The ICE adapter process could not be launched
//! - 4: An OS call on the running adapter failed

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid settings file.
pub const USER_ERROR: i32 = 1;

/// The OS refused to hand out an ephemeral port.
pub const ALLOCATION_FAILURE: i32 = 2;

/// The adapter process failed to start.
pub const LAUNCH_FAILURE: i32 = 3;

/// Waiting on, signalling or killing the adapter failed.
pub const PROCESS_FAILURE: i32 = 4;
