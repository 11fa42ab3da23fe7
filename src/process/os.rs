//! A real child process with captured output.

use super::handle::{ChildHandle, OutputLine, ReadOutcome, Stream};
use super::signal::request_termination;
use crate::error::{Result, SupervisorError};
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

/// Granularity of `wait_timeout` polling.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A spawned OS process whose stdout and stderr are drained by reader threads.
///
/// The reader threads push lines into a channel as soon as they appear, so a
/// chatty child never blocks on a full pipe while nobody is reading.
pub struct OsChild {
    pid: u32,
    child: Mutex<Child>,
    output: Mutex<Receiver<OutputLine>>,
}

impl OsChild {
    /// Spawn `command` with stdin closed and stdout/stderr piped.
    pub fn spawn(mut command: Command) -> io::Result<Self> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn()?;
        let pid = child.id();

        let (tx, rx) = mpsc::channel();
        if let Some(stdout) = child.stdout.take() {
            spawn_reader(stdout, Stream::Stdout, tx.clone())?;
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader(stderr, Stream::Stderr, tx)?;
        }

        Ok(Self {
            pid,
            child: Mutex::new(child),
            output: Mutex::new(rx),
        })
    }

    fn lock_child(&self) -> MutexGuard<'_, Child> {
        self.child.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    fn try_status(&self) -> Result<Option<ExitStatus>> {
        self.lock_child().try_wait().map_err(|e| {
            SupervisorError::Process(format!(
                "failed to check status of process {}: {}",
                self.pid, e
            ))
        })
    }
}

impl ChildHandle for OsChild {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn is_alive(&self) -> Result<bool> {
        Ok(self.try_status()?.is_none())
    }

    fn read_output(&self, timeout: Duration) -> ReadOutcome {
        let output = self.output.lock().unwrap_or_else(|poison| poison.into_inner());

        let first = match output.recv_timeout(timeout) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => return ReadOutcome::TimedOut,
            Err(RecvTimeoutError::Disconnected) => return ReadOutcome::Closed,
        };

        let mut lines = vec![first];
        loop {
            match output.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ReadOutcome::Lines(lines)
    }

    fn wait_timeout(&self, timeout: Duration) -> Result<bool> {
        let start = Instant::now();

        loop {
            if self.try_status()?.is_some() {
                return Ok(true);
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Ok(false);
            }
            thread::sleep(WAIT_POLL_INTERVAL.min(timeout - elapsed));
        }
    }

    fn terminate(&self) -> Result<()> {
        let mut child = self.lock_child();

        // Never signal a pid that has already been reaped; it may be reused.
        if matches!(child.try_wait(), Ok(Some(_))) {
            return Ok(());
        }

        request_termination(self.pid, &mut child).map_err(|e| {
            SupervisorError::Process(format!(
                "failed to request termination of process {}: {}",
                self.pid, e
            ))
        })
    }

    fn kill(&self) -> Result<()> {
        let mut child = self.lock_child();

        // On Unix this is SIGKILL; on Windows it is TerminateProcess.
        child.kill().map_err(|e| {
            SupervisorError::Process(format!("failed to kill process {}: {}", self.pid, e))
        })?;
        child.wait().map_err(|e| {
            SupervisorError::Process(format!(
                "failed to reap killed process {}: {}",
                self.pid, e
            ))
        })?;
        Ok(())
    }

    fn exit_code(&self) -> Option<i32> {
        let status = self.lock_child().try_wait().ok().flatten()?;
        exit_code_of(status)
    }
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.code().or_else(|| status.signal().map(|sig| -sig))
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> Option<i32> {
    status.code()
}

fn spawn_reader<R>(pipe: R, stream: Stream, tx: Sender<OutputLine>) -> io::Result<()>
where
    R: Read + Send + 'static,
{
    let name = match stream {
        Stream::Stdout => "ice-adapter-stdout",
        Stream::Stderr => "ice-adapter-stderr",
    };

    thread::Builder::new().name(name.to_string()).spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&buf)
                        .trim_end_matches(['\r', '\n'])
                        .to_string();
                    if tx.send(OutputLine { stream, text }).is_err() {
                        break;
                    }
                }
            }
        }
    })?;

    Ok(())
}
