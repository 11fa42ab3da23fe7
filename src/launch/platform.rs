//! Platform-specific executable resolution.

use std::path::{Path, PathBuf};

/// Directory under the install dir that holds the adapter build.
pub const ADAPTER_DIR: &str = "ice-adapter";

const NATIVE_BINARY: &str = "faf-ice-adapter.exe";
const BUNDLED_JAR: &str = "faf-ice-adapter.jar";

/// Which adapter build to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Native Windows executable shipped with the client.
    Windows,
    /// Bundled jar started through a Java launcher found on `PATH`.
    Other,
}

impl Platform {
    /// Platform of the running host.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

/// The program to spawn plus any arguments that must precede the adapter flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub program: PathBuf,
    pub leading_args: Vec<String>,
}

impl Executable {
    /// Resolve the adapter executable for `platform`.
    ///
    /// # Arguments
    ///
    /// * `platform` - Which build to use
    /// * `lib_dir` - Install directory containing `ice-adapter/`
    /// * `java` - Launcher used for the jar build
    pub fn resolve(platform: Platform, lib_dir: &Path, java: &str) -> Self {
        let adapter_dir = lib_dir.join(ADAPTER_DIR);
        match platform {
            Platform::Windows => Self {
                program: adapter_dir.join(NATIVE_BINARY),
                leading_args: Vec::new(),
            },
            Platform::Other => Self {
                program: PathBuf::from(java),
                leading_args: vec![
                    "-jar".to_string(),
                    adapter_dir.join(BUNDLED_JAR).to_string_lossy().into_owned(),
                ],
            },
        }
    }
}
