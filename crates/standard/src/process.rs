//! Subprocess capture, liveness checking and the daemon PID/READY-line
//! protocol.
//!
//! This is distinct from [`crate::command`]'s general-purpose executor: it
//! owns the narrower contract the registry daemon and the CLI's `up`/`down`/
//! `status` commands share — a PID file format, a way to ask "is that PID
//! still the daemon I started" (not just "is some process alive"), and the
//! handshake where a freshly-spawned daemon prints one `READY` line on
//! stdout before the parent considers it up.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProcessError, ProcessResult};

/// Contents of the daemon PID file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PidInfo {
    /// OS process ID of the daemon.
    pub pid: u32,
    /// Port the daemon is listening on.
    pub port: u16,
    /// Unix-epoch milliseconds the daemon recorded at start-up, used to
    /// detect PID reuse (a new, unrelated process that happens to have
    /// inherited the recorded PID).
    pub started_at: u64,
}

impl PidInfo {
    /// Writes this record to `path` as JSON, creating parent directories as
    /// needed.
    ///
    /// # Errors
    /// Returns [`ProcessError::SpawnFailed`] if the file cannot be written
    /// (reusing that variant's I/O-failure shape rather than adding a new
    /// one just for this call site).
    pub fn write(&self, path: &Path) -> ProcessResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ProcessError::SpawnFailed { message: e.to_string() })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ProcessError::SpawnFailed { message: e.to_string() })?;
        std::fs::write(path, json).map_err(|e| ProcessError::SpawnFailed { message: e.to_string() })
    }

    /// Reads the PID file at `path`. Accepts both the current JSON object
    /// form and the legacy plain-integer form (`4242`), in which case `port`
    /// and `started_at` are `0` and callers should fall back to other means
    /// of confirming the daemon's identity.
    ///
    /// # Errors
    /// Returns [`ProcessError::PidUnavailable`] if the file is missing or its
    /// contents match neither form.
    pub fn read(path: &Path) -> ProcessResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ProcessError::PidUnavailable { reason: e.to_string() })?;
        let trimmed = raw.trim();

        if let Ok(pid) = trimmed.parse::<u32>() {
            return Ok(Self { pid, port: 0, started_at: 0 });
        }

        let value: Value = serde_json::from_str(trimmed)
            .map_err(|e| ProcessError::PidUnavailable { reason: e.to_string() })?;
        serde_json::from_value(value).map_err(|e| ProcessError::PidUnavailable { reason: e.to_string() })
    }
}

/// Whether a process with the given PID currently exists, via `kill -0`
/// (sends no signal, only checks existence/permission).
#[must_use]
pub fn is_alive(pid: u32) -> bool {
    StdCommand::new("kill")
        .args(["-0", &pid.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// Sends `SIGTERM` to `pid`, then polls for exit up to `grace`; if still
/// alive, sends `SIGKILL`.
///
/// # Errors
/// Returns [`ProcessError::KillFailed`] if neither signal could be sent
/// (the process table rejected the request, not merely "already exited").
pub fn stop_gracefully(pid: u32, grace: Duration) -> ProcessResult<()> {
    if !is_alive(pid) {
        return Ok(());
    }

    let term = StdCommand::new("kill").args(["-TERM", &pid.to_string()]).status();
    if let Ok(status) = term {
        if !status.success() && is_alive(pid) {
            return Err(ProcessError::KillFailed {
                pid: Some(pid),
                message: "SIGTERM delivery failed".to_string(),
            });
        }
    }

    let deadline = Instant::now() + grace;
    while Instant::now() < deadline {
        if !is_alive(pid) {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    if !is_alive(pid) {
        return Ok(());
    }

    let kill = StdCommand::new("kill")
        .args(["-KILL", &pid.to_string()])
        .status()
        .map_err(|e| ProcessError::KillFailed { pid: Some(pid), message: e.to_string() })?;
    if kill.success() || !is_alive(pid) {
        Ok(())
    } else {
        Err(ProcessError::KillFailed { pid: Some(pid), message: "SIGKILL delivery failed".to_string() })
    }
}

/// Spawns `program` with `args` detached from the current terminal, and
/// blocks up to `timeout` for a single line equal to `ready_line` on its
/// stdout. Returns the child's PID once the line is observed.
///
/// The reader thread stops consuming the child's stdout the instant it sees
/// `ready_line`, so the contract with the child is: print exactly one
/// `ready_line` and then immediately redirect its own stdout/stderr file
/// descriptors elsewhere (a log file) before producing any further output.
/// `pkglab-registryd` follows this contract.
///
/// # Errors
/// Returns [`ProcessError::SpawnFailed`] if the process cannot be started,
/// or [`ProcessError::ReadyTimeout`] if `ready_line` doesn't appear within
/// `timeout`.
pub fn spawn_and_wait_ready(
    program: &str,
    args: &[String],
    ready_line: &str,
    timeout: Duration,
) -> ProcessResult<u32> {
    let mut child = StdCommand::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ProcessError::spawn(&e))?;

    let pid = child.id();
    let stdout = child.stdout.take().ok_or_else(|| ProcessError::SpawnFailed {
        message: "child stdout was not piped".to_string(),
    })?;

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(Result::ok) {
            let matched = line.trim() == ready_line.trim();
            let should_stop = matched;
            let _ = tx.send(line);
            if should_stop {
                break;
            }
        }
    });

    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ProcessError::ReadyTimeout { waited_ms: timeout.as_millis() as u64 });
        }
        match rx.recv_timeout(remaining) {
            Ok(line) if line.trim() == ready_line.trim() => return Ok(pid),
            Ok(_) => continue,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                return Err(ProcessError::ReadyTimeout { waited_ms: timeout.as_millis() as u64 })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(ProcessError::ReadyTimeout { waited_ms: timeout.as_millis() as u64 })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_process_is_alive() {
        assert!(is_alive(std::process::id()));
    }

    #[test]
    fn bogus_pid_is_not_alive() {
        assert!(!is_alive(u32::MAX - 1));
    }

    #[test]
    fn pid_file_round_trips() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("pid.json");
        let info = PidInfo { pid: 1234, port: 4873, started_at: 1_700_000_000_000 };
        info.write(&path).expect("write");
        let loaded = PidInfo::read(&path).expect("read");
        assert_eq!(loaded, info);
    }

    #[test]
    fn pid_file_accepts_legacy_plain_number() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("pid.json");
        std::fs::write(&path, "4242\n").expect("write");
        let loaded = PidInfo::read(&path).expect("read");
        assert_eq!(loaded.pid, 4242);
    }

    #[test]
    fn spawn_and_wait_ready_observes_the_line() {
        let pid = spawn_and_wait_ready(
            "sh",
            &["-c".to_string(), "echo READY; sleep 5".to_string()],
            "READY",
            Duration::from_secs(3),
        )
        .expect("spawn_and_wait_ready");
        assert!(pid > 0);
        let _ = stop_gracefully(pid, Duration::from_millis(200));
    }
}
