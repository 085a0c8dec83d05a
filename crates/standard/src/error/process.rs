//! Process management error type.
//!
//! What:
//! Defines specific error types for process management failures, providing
//! detailed error information for process-related operations: spawning,
//! liveness checks, graceful shutdown, and the daemon READY-line handshake.
//!
//! Who:
//! Used by developers who need to:
//! - Handle process management failures
//! - Track process lifecycle errors
//! - Implement custom process error handling
//!
//! Why:
//! Process management requires specific error handling to provide proper
//! context about what went wrong during process lifecycle operations.

use core::result::Result as CoreResult;
use std::io;
use thiserror::Error;

/// Error type for process management failures.
///
/// # Examples
///
/// ```rust
/// use sublime_standard_tools::error::ProcessError;
///
/// let error = ProcessError::SpawnFailed { message: "not found".to_string() };
/// assert!(error.to_string().contains("Failed to spawn process"));
/// ```
#[derive(Error, Debug, Clone)]
pub enum ProcessError {
    /// Failed to spawn a new process.
    #[error("Failed to spawn process: {message}")]
    SpawnFailed {
        /// The underlying I/O failure message.
        message: String,
    },

    /// Failed to kill a running process.
    #[error("Failed to kill process (PID: {pid:?}): {message}")]
    KillFailed {
        /// The process identifier that couldn't be killed, if available.
        pid: Option<u32>,
        /// The underlying I/O failure message.
        message: String,
    },

    /// Process exited with a non-zero status code.
    #[error("Process exited with error (code: {code:?})")]
    ExitError {
        /// The exit code returned by the process, if available.
        code: Option<i32>,
    },

    /// Failed to wait for a process to complete.
    #[error("Failed to wait for process: {message}")]
    WaitFailed {
        /// The underlying I/O failure message.
        message: String,
    },

    /// Another instance is already live at the recorded PID.
    #[error("Daemon already running (PID: {pid})")]
    AlreadyRunning {
        /// PID of the live daemon.
        pid: u32,
    },

    /// The daemon is not running but an operation required it.
    #[error("Daemon is not running")]
    NotRunning,

    /// The daemon did not print its READY line before the handshake deadline.
    #[error("Timed out waiting for daemon ready handshake after {waited_ms}ms")]
    ReadyTimeout {
        /// Milliseconds actually waited.
        waited_ms: u64,
    },

    /// Process ID (PID) was expected but not found, or the PID file was malformed.
    #[error("Process ID not available: {reason}")]
    PidUnavailable {
        /// Why the PID could not be determined.
        reason: String,
    },
}

impl ProcessError {
    /// Wraps an I/O error encountered while spawning a process.
    #[must_use]
    pub fn spawn(err: &io::Error) -> Self {
        Self::SpawnFailed { message: err.to_string() }
    }

    /// Wraps an I/O error encountered while killing a process.
    #[must_use]
    pub fn kill(pid: Option<u32>, err: &io::Error) -> Self {
        Self::KillFailed { pid, message: err.to_string() }
    }

    /// Wraps an I/O error encountered while waiting on a process.
    #[must_use]
    pub fn wait(err: &io::Error) -> Self {
        Self::WaitFailed { message: err.to_string() }
    }
}

impl AsRef<str> for ProcessError {
    fn as_ref(&self) -> &str {
        match self {
            Self::SpawnFailed { .. } => "ProcessError::SpawnFailed",
            Self::KillFailed { .. } => "ProcessError::KillFailed",
            Self::ExitError { .. } => "ProcessError::ExitError",
            Self::WaitFailed { .. } => "ProcessError::WaitFailed",
            Self::AlreadyRunning { .. } => "ProcessError::AlreadyRunning",
            Self::NotRunning => "ProcessError::NotRunning",
            Self::ReadyTimeout { .. } => "ProcessError::ReadyTimeout",
            Self::PidUnavailable { .. } => "ProcessError::PidUnavailable",
        }
    }
}

/// Result type for process operations.
pub type ProcessResult<T> = CoreResult<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_display() {
        let spawn_error = ProcessError::SpawnFailed { message: "not found".to_string() };
        assert_eq!(spawn_error.to_string(), "Failed to spawn process: not found");

        let exit_error = ProcessError::ExitError { code: Some(1) };
        assert_eq!(exit_error.to_string(), "Process exited with error (code: Some(1))");
    }

    #[test]
    fn test_already_running_mentions_pid() {
        let error = ProcessError::AlreadyRunning { pid: 4242 };
        assert!(error.to_string().contains("4242"));
    }
}
