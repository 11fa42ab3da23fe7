//! Shared fixtures for unit tests: scripted children, spawners and recorders.

use crate::error::{Result, SupervisorError};
use crate::launch::LaunchSpec;
use crate::notify::Notifier;
use crate::process::{ChildHandle, OutputLine, ReadOutcome, Spawner};
use crate::sink::OutputSink;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Switches the working directory for the lifetime of the guard.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Held even under #[serial]; the working directory is process-wide.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Exit code a fake child reports after a graceful termination request.
pub(crate) const TERMINATED_CODE: i32 = -15;

/// Exit code a fake child reports after being killed.
pub(crate) const KILLED_CODE: i32 = -9;

/// A control call made on a [`FakeChild`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Wait(Duration),
    Terminate,
    Kill,
}

/// How a [`FakeChild`] reacts to shutdown.
#[derive(Debug, Clone, Copy)]
enum Cooperation {
    /// Exits with the code during the first wait.
    ExitsOnWait(i32),
    /// Ignores waiting, exits on a termination request.
    HonorsTerminate,
    /// Only a kill brings it down.
    Stubborn,
    /// Like `Stubborn`, and every termination request fails.
    RefusesTerminate,
}

struct FakeState {
    alive: bool,
    exit_code: Option<i32>,
    output: VecDeque<OutputLine>,
    exits_after_checks: Option<(u32, i32)>,
    liveness_checks: u32,
    liveness_fails: bool,
    calls: Vec<Call>,
}

type WaitHook = Box<dyn Fn() + Send>;

/// Scripted child process for supervisor and pump tests.
pub(crate) struct FakeChild {
    pid: u32,
    cooperation: Cooperation,
    state: Mutex<FakeState>,
    wait_hook: Mutex<Option<WaitHook>>,
}

impl FakeChild {
    /// A running child that only dies when killed.
    pub(crate) fn new() -> Self {
        Self {
            pid: 4242,
            cooperation: Cooperation::Stubborn,
            state: Mutex::new(FakeState {
                alive: true,
                exit_code: None,
                output: VecDeque::new(),
                exits_after_checks: None,
                liveness_checks: 0,
                liveness_fails: false,
                calls: Vec::new(),
            }),
            wait_hook: Mutex::new(None),
        }
    }

    pub(crate) fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub(crate) fn with_output(self, lines: Vec<OutputLine>) -> Self {
        self.lock().output.extend(lines);
        self
    }

    /// Exit with `code` on the first wait of `close()`.
    pub(crate) fn exits_on_wait(mut self, code: i32) -> Self {
        self.cooperation = Cooperation::ExitsOnWait(code);
        self
    }

    pub(crate) fn honors_terminate(mut self) -> Self {
        self.cooperation = Cooperation::HonorsTerminate;
        self
    }

    pub(crate) fn refuses_terminate(mut self) -> Self {
        self.cooperation = Cooperation::RefusesTerminate;
        self
    }

    /// Every liveness check returns an error.
    pub(crate) fn fails_liveness_checks(self) -> Self {
        self.lock().liveness_fails = true;
        self
    }

    /// Run `hook` at the start of every `wait_timeout` call.
    pub(crate) fn on_wait(&self, hook: impl Fn() + Send + 'static) {
        *self
            .wait_hook
            .lock()
            .unwrap_or_else(|poison| poison.into_inner()) = Some(Box::new(hook));
    }

    /// Exit with `code` once `checks` liveness checks have reported it alive.
    pub(crate) fn exits_by_itself_after(self, checks: u32, code: i32) -> Self {
        self.lock().exits_after_checks = Some((checks, code));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn liveness_checks(&self) -> u32 {
        self.lock().liveness_checks
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

fn exit(state: &mut FakeState, code: i32) {
    if state.alive {
        state.alive = false;
        state.exit_code = Some(code);
    }
}

impl ChildHandle for FakeChild {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn is_alive(&self) -> Result<bool> {
        let mut state = self.lock();
        if let Some((checks, code)) = state.exits_after_checks {
            if state.liveness_checks >= checks {
                exit(&mut state, code);
            }
        }
        state.liveness_checks += 1;
        if state.liveness_fails {
            return Err(SupervisorError::Process(format!(
                "failed to check status of process {}",
                self.pid
            )));
        }
        Ok(state.alive)
    }

    fn read_output(&self, timeout: Duration) -> ReadOutcome {
        let mut state = self.lock();
        if !state.output.is_empty() {
            return ReadOutcome::Lines(state.output.drain(..).collect());
        }
        if !state.alive {
            return ReadOutcome::Closed;
        }
        drop(state);

        thread::sleep(timeout);
        ReadOutcome::TimedOut
    }

    fn wait_timeout(&self, timeout: Duration) -> Result<bool> {
        if let Some(hook) = self
            .wait_hook
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .as_ref()
        {
            hook();
        }

        let mut state = self.lock();
        state.calls.push(Call::Wait(timeout));
        if !state.alive {
            return Ok(true);
        }
        if let Cooperation::ExitsOnWait(code) = self.cooperation {
            exit(&mut state, code);
            return Ok(true);
        }
        drop(state);

        thread::sleep(timeout);
        Ok(!self.lock().alive)
    }

    fn terminate(&self) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Terminate);
        match self.cooperation {
            Cooperation::HonorsTerminate => exit(&mut state, TERMINATED_CODE),
            Cooperation::RefusesTerminate => {
                return Err(SupervisorError::Process(format!(
                    "failed to request termination of process {}: EPERM",
                    self.pid
                )));
            }
            _ => {}
        }
        Ok(())
    }

    fn kill(&self) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Kill);
        exit(&mut state, KILLED_CODE);
        Ok(())
    }

    fn exit_code(&self) -> Option<i32> {
        self.lock().exit_code
    }
}

/// Hands out a prepared [`FakeChild`] regardless of the launch spec.
pub(crate) struct FakeSpawner {
    pub(crate) child: Arc<FakeChild>,
}

impl Spawner for FakeSpawner {
    fn spawn(&self, _spec: &LaunchSpec) -> io::Result<Arc<dyn ChildHandle>> {
        Ok(self.child.clone())
    }
}

/// Fails every spawn the way a missing executable does.
pub(crate) struct FailingSpawner;

impl Spawner for FailingSpawner {
    fn spawn(&self, spec: &LaunchSpec) -> io::Result<Arc<dyn ChildHandle>> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", spec.program().display()),
        ))
    }
}

/// Runs a shell script instead of the adapter.
#[cfg(unix)]
pub(crate) struct ShellSpawner {
    pub(crate) script: &'static str,
}

#[cfg(unix)]
impl Spawner for ShellSpawner {
    fn spawn(&self, _spec: &LaunchSpec) -> io::Result<Arc<dyn ChildHandle>> {
        let mut command = std::process::Command::new("sh");
        command.args(["-c", self.script]);
        Ok(Arc::new(crate::process::OsChild::spawn(command)?))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn notices(&self) -> Vec<(String, String)> {
        self.notices
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_critical(&self, title: &str, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push((title.to_string(), message.to_string()));
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    lines: Mutex<Vec<OutputLine>>,
}

impl RecordingSink {
    pub(crate) fn lines(&self) -> Vec<OutputLine> {
        self.lines
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl OutputSink for RecordingSink {
    fn line(&self, line: &OutputLine) {
        self.lines
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(line.clone());
    }
}
