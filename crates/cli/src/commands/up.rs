//! `pub up`: starts the registry daemon as a detached child process.

use std::time::Duration;

use sublime_standard_tools::process::{self, spawn_and_wait_ready, PidInfo};

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

const READY_LINE: &str = "READY";
const START_TIMEOUT: Duration = Duration::from_secs(10);
const REGISTRYD_BINARY: &str = "pkglab-registryd";

/// Spawns `pkglab-registryd` detached from this process, waits for its
/// `READY` line, and records its PID/port/start time in the home
/// directory's PID file.
///
/// # Errors
/// Returns [`CliError::DaemonAlreadyRunning`] if a live daemon is already
/// recorded, or a wrapped process error if spawning or the READY handshake
/// fails.
pub async fn run(out: &OutputManager, port: Option<u16>) -> CliResult<()> {
    let ctx = CliContext::load()?;

    if let Some(info) = ctx.read_pid() {
        if process::is_alive(info.pid) {
            return Err(CliError::DaemonAlreadyRunning(info.pid));
        }
    }

    let port = port.unwrap_or(ctx.config.port);
    let registryd = locate_registryd()?;

    let pid = spawn_and_wait_ready(
        registryd.to_string_lossy().as_ref(),
        &["--port".to_string(), port.to_string()],
        READY_LINE,
        START_TIMEOUT,
    )
    .map_err(|e| CliError::Standard(e.into()))?;

    let started_at = sublime_sync_tools::repo_state::now_ms();
    PidInfo { pid, port, started_at }
        .write(&ctx.paths.pid_file())
        .map_err(|e| CliError::Standard(e.into()))?;

    out.success(&format!("pkglab registry listening on 127.0.0.1:{port} (pid {pid})"));
    Ok(())
}

fn locate_registryd() -> CliResult<std::path::PathBuf> {
    let current = std::env::current_exe().map_err(|e| CliError::Io(e.to_string()))?;
    let dir = current
        .parent()
        .ok_or_else(|| CliError::Io("executable has no parent directory".to_string()))?;
    let candidate = dir.join(REGISTRYD_BINARY);
    if candidate.is_file() {
        return Ok(candidate);
    }
    Err(CliError::Io(format!("{REGISTRYD_BINARY} not found alongside {}", current.display())))
}
