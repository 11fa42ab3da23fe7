//! Supervisor for the ICE adapter process.
//!
//! One supervisor exists per network session. It allocates the RPC port,
//! launches the adapter with that port on its command line, keeps a log pump
//! running for the adapter's lifetime and shuts the adapter down through an
//! escalating protocol:
//!
//! ```text
//! alive? ──no──► done
//!   │yes
//!   ▼
//! wait(timeout) ──exited──► done
//!   │timeout
//!   ▼
//! terminate, wait(timeout) ──exited──► done
//!   │timeout
//!   ▼
//! kill (logged as error) ──► done
//! ```
//!
//! Only the log pump reads the exit code. `close()` looks at liveness alone.

use crate::config::Settings;
use crate::error::{Result, SupervisorError};
use crate::launch::{LaunchSpec, Player};
use crate::notify::{NOTIFICATION_TITLE, Notifier};
use crate::port::allocate_port;
use crate::process::{ChildHandle, OsSpawner, Spawner};
use crate::pump::{ExitReport, LogPump};
use crate::sink::{OutputSink, TracingSink};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

/// Timing of the shutdown escalation and the log pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownPolicy {
    /// Wait applied before terminating and again before killing.
    pub timeout: Duration,
    /// Bounded read wait of the log pump.
    pub poll_interval: Duration,
}

impl ShutdownPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            timeout: settings.shutdown_timeout(),
            poll_interval: settings.poll_interval(),
        }
    }
}

impl Default for ShutdownPolicy {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Where the adapter is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Starting,
    Running,
    ShuttingDown,
    /// Reported by the log pump. `None` when the code could not be read.
    Exited(Option<i32>),
}

/// Which stage of `close()` saw the adapter go away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The adapter was already gone; nothing was sent.
    NotRunning,
    /// Exited on its own within the first wait.
    Exited,
    /// Exited after the termination request.
    Terminated,
    /// Had to be killed.
    Killed,
}

/// Owns the adapter process for one session.
///
/// Dropping a supervisor without calling [`Supervisor::close`] leaves the
/// adapter running; its log pump keeps forwarding output until it exits.
pub struct Supervisor {
    rpc_port: u16,
    launch: LaunchSpec,
    child: Arc<dyn ChildHandle>,
    lifecycle: Arc<Mutex<Lifecycle>>,
    pump: Option<JoinHandle<()>>,
    policy: ShutdownPolicy,
}

impl Supervisor {
    /// Allocate a port and launch the adapter for `player`.
    ///
    /// # Errors
    ///
    /// * `SupervisorError::Allocation` - no ephemeral port was available
    /// * `SupervisorError::Launch` - the adapter did not start; `notifier`
    ///   has already been told
    pub fn start(player: &Player, settings: &Settings, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::start_with(
            |rpc_port| LaunchSpec::build(player, rpc_port, settings),
            &OsSpawner,
            ShutdownPolicy::from_settings(settings),
            notifier,
            Arc::new(TracingSink),
        )
    }

    /// Launch with every collaborator supplied by the caller.
    ///
    /// `build_spec` receives the allocated RPC port and returns the launch
    /// spec; it is called exactly once.
    pub fn start_with<F>(
        build_spec: F,
        spawner: &dyn Spawner,
        policy: ShutdownPolicy,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn OutputSink>,
    ) -> Result<Self>
    where
        F: FnOnce(u16) -> LaunchSpec,
    {
        let rpc_port = allocate_port()?;
        let launch = build_spec(rpc_port);
        let lifecycle = Arc::new(Mutex::new(Lifecycle::Starting));

        tracing::debug!("running ice adapter with {}", launch);

        let child = match spawner.spawn(&launch) {
            Ok(child) if child.pid() != 0 => child,
            Ok(_) => {
                return Err(launch_failed(
                    notifier.as_ref(),
                    "process did not get a process id".to_string(),
                ));
            }
            Err(e) => {
                return Err(launch_failed(
                    notifier.as_ref(),
                    format!("'{}': {}", launch.program().display(), e),
                ));
            }
        };

        *lock(&lifecycle) = Lifecycle::Running;
        tracing::info!(pid = child.pid(), rpc_port, "ICE adapter started");

        let reporter = CrashReporter {
            notifier: notifier.clone(),
            lifecycle: lifecycle.clone(),
        };
        let pump = LogPump::new(child.clone(), sink, policy.poll_interval)
            .spawn(move |report| reporter.report(report));

        let pump = match pump {
            Ok(handle) => handle,
            Err(e) => {
                // An adapter nobody drains would block on a full pipe.
                if let Err(kill_err) = child.kill() {
                    tracing::error!(error = %kill_err, "failed to kill unsupervised ICE adapter");
                }
                return Err(launch_failed(
                    notifier.as_ref(),
                    format!("failed to start log pump: {}", e),
                ));
            }
        };

        Ok(Self {
            rpc_port,
            launch,
            child,
            lifecycle,
            pump: Some(pump),
            policy,
        })
    }

    /// Port of the adapter's RPC server.
    ///
    /// Stays valid after the adapter exited; it says nothing about liveness.
    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    pub fn pid(&self) -> u32 {
        self.child.pid()
    }

    pub fn launch_spec(&self) -> &LaunchSpec {
        &self.launch
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *lock(&self.lifecycle)
    }

    /// Block until the adapter exits by itself and its exit has been reported.
    pub fn wait_for_exit(&mut self) -> Lifecycle {
        self.join_pump();
        self.lifecycle()
    }

    /// Shut the adapter down.
    ///
    /// Waits for a natural exit, then requests termination, then kills. Each
    /// wait is bounded by the policy timeout. Calling `close()` on an adapter
    /// that is already gone only checks liveness.
    ///
    /// # Errors
    ///
    /// * `SupervisorError::Process` - waiting failed, or the kill failed and
    ///   the adapter may still be running
    pub fn close(&mut self) -> Result<CloseOutcome> {
        let alive = self.child.is_alive().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not check ICE adapter, shutting it down anyway");
            true
        });
        if !alive {
            self.join_pump();
            return Ok(CloseOutcome::NotRunning);
        }

        {
            let mut lifecycle = lock(&self.lifecycle);
            if *lifecycle == Lifecycle::Running {
                *lifecycle = Lifecycle::ShuttingDown;
            }
        }

        tracing::info!("Waiting for ICE adapter process shutdown");
        let outcome = self.escalate()?;

        self.join_pump();
        tracing::debug!(?outcome, "ICE adapter shut down");
        Ok(outcome)
    }

    fn escalate(&self) -> Result<CloseOutcome> {
        let timeout = self.policy.timeout;

        if self.child.wait_timeout(timeout)? {
            return Ok(CloseOutcome::Exited);
        }

        tracing::info!(?timeout, "ICE adapter still running, requesting termination");
        if let Err(e) = self.child.terminate() {
            // The kill below still runs.
            tracing::error!(error = %e, "failed to request ICE adapter termination");
        }
        if self.child.wait_timeout(timeout)? {
            return Ok(CloseOutcome::Terminated);
        }

        tracing::error!(pid = self.child.pid(), "Killing ICE adapter process");
        self.child.kill()?;
        Ok(CloseOutcome::Killed)
    }

    fn join_pump(&mut self) {
        if let Some(handle) = self.pump.take() {
            if handle.join().is_err() {
                tracing::error!("ICE adapter log pump panicked");
            }
        }
    }
}

/// Reacts to the log pump's exit report.
struct CrashReporter {
    notifier: Arc<dyn Notifier>,
    lifecycle: Arc<Mutex<Lifecycle>>,
}

impl CrashReporter {
    fn report(&self, report: ExitReport) {
        *lock(&self.lifecycle) = Lifecycle::Exited(report.code());

        match report {
            ExitReport::Clean => {
                tracing::debug!("The ICE adapter closed with exit code 0");
            }
            ExitReport::Crashed(code) => {
                tracing::error!(code, "the ICE adapter crashed");
                self.notifier.notify_critical(
                    NOTIFICATION_TITLE,
                    &format!(
                        "The ICE adapter crashed (exit code {}). Please restart the game session.",
                        code
                    ),
                );
            }
            ExitReport::Unknown => {
                tracing::warn!("The ICE adapter exited without an exit code");
            }
        }
    }
}

fn launch_failed(notifier: &dyn Notifier, detail: String) -> SupervisorError {
    tracing::error!("error starting the ice adapter process: {}", detail);
    notifier.notify_critical(
        NOTIFICATION_TITLE,
        "The ICE adapter did not start. Please restart the game session.",
    );
    SupervisorError::Launch(detail)
}

fn lock(lifecycle: &Mutex<Lifecycle>) -> MutexGuard<'_, Lifecycle> {
    lifecycle.lock().unwrap_or_else(|poison| poison.into_inner())
}
