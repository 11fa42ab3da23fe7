//! Implementation of the `icewarden run` command.

use crate::cli::RunArgs;
use icewarden::config::Settings;
use icewarden::error::Result;
use icewarden::launch::Player;
use icewarden::notify::LogNotifier;
use icewarden::supervisor::{CloseOutcome, Lifecycle, Supervisor};
use std::sync::Arc;
use std::time::Duration;

/// Execute the `icewarden run` command.
///
/// Starts the adapter, prints its RPC port on stdout, then either closes it
/// after `--for-secs` or waits for it to exit by itself. A crash is reported
/// through the log, not through the exit code of this command.
pub fn cmd_run(args: RunArgs, settings: &Settings) -> Result<()> {
    let player: Player = args.player.into();
    let mut supervisor = Supervisor::start(&player, settings, Arc::new(LogNotifier))?;

    println!("{}", supervisor.rpc_port());

    if let Some(secs) = args.for_secs {
        std::thread::sleep(Duration::from_secs(secs));
    } else {
        supervisor.wait_for_exit();
    }

    let outcome = supervisor.close()?;
    if outcome != CloseOutcome::NotRunning {
        tracing::info!(?outcome, "ICE adapter closed");
    }

    if let Lifecycle::Exited(Some(code)) = supervisor.lifecycle() {
        tracing::info!(code, "ICE adapter session finished");
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cli::PlayerArgs;
    use tempfile::TempDir;

    #[test]
    fn test_run_until_adapter_exits() {
        let temp_dir = TempDir::new().unwrap();

        // `true` stands in for the Java launcher and exits right away.
        let settings = Settings {
            lib_dir: Some(temp_dir.path().to_path_buf()),
            log_directory: temp_dir.path().join("logs"),
            java: "true".to_string(),
            poll_interval_ms: 10,
            ..Default::default()
        };
        let args = RunArgs {
            player: PlayerArgs {
                id: 1,
                login: "a".to_string(),
            },
            for_secs: None,
        };

        cmd_run(args, &settings).unwrap();
        assert!(temp_dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_run_with_missing_launcher_fails() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            lib_dir: Some(temp_dir.path().to_path_buf()),
            log_directory: temp_dir.path().join("logs"),
            java: "nonexistent_launcher_xyz_123".to_string(),
            ..Default::default()
        };
        let args = RunArgs {
            player: PlayerArgs {
                id: 1,
                login: "a".to_string(),
            },
            for_secs: Some(0),
        };

        let err = cmd_run(args, &settings).unwrap_err();
        assert!(err.to_string().contains("Failed to launch ICE adapter"));
    }
}
