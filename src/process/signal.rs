//! Graceful termination requests.

use std::io;
use std::process::Child;

/// Send SIGTERM to `pid`. A process that is already gone is not an error.
#[cfg(unix)]
pub(crate) fn request_termination(pid: u32, _child: &mut Child) -> io::Result<()> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;

    // SAFETY: kill(2) has no memory-safety preconditions.
    let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
    if rc == 0 {
        return Ok(());
    }

    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        Ok(())
    } else {
        Err(err)
    }
}

/// Windows has no cooperative signal for console-less children; terminate directly.
#[cfg(not(unix))]
pub(crate) fn request_termination(_pid: u32, child: &mut Child) -> io::Result<()> {
    child.kill()
}
