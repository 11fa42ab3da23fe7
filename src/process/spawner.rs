//! Spawning adapter processes from a launch spec.

use super::handle::ChildHandle;
use super::os::OsChild;
use crate::launch::LaunchSpec;
use std::io;
use std::process::Command;
use std::sync::Arc;

/// Starts a child process for a [`LaunchSpec`].
pub trait Spawner {
    fn spawn(&self, spec: &LaunchSpec) -> io::Result<Arc<dyn ChildHandle>>;
}

/// Spawns real OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSpawner;

impl Spawner for OsSpawner {
    fn spawn(&self, spec: &LaunchSpec) -> io::Result<Arc<dyn ChildHandle>> {
        // The adapter writes its own log files here.
        std::fs::create_dir_all(spec.log_directory())?;

        let mut command = Command::new(spec.program());
        command.args(spec.args());

        let child = OsChild::spawn(command)?;
        Ok(Arc::new(child))
    }
}
