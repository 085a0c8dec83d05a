//! `pub down`: stops the registry daemon gracefully.

use std::time::Duration;

use sublime_standard_tools::process;

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

const STOP_GRACE: Duration = Duration::from_secs(5);

/// Sends `SIGTERM` to the recorded PID (escalating to `SIGKILL` after a
/// grace period) and removes the PID file.
///
/// # Errors
/// Returns [`CliError::DaemonNotRunning`] if no PID file is recorded.
pub fn run(ctx: &CliContext, out: &OutputManager) -> CliResult<()> {
    let Some(info) = ctx.read_pid() else {
        return Err(CliError::DaemonNotRunning);
    };
    process::stop_gracefully(info.pid, STOP_GRACE).map_err(|e| CliError::Standard(e.into()))?;
    let _ = std::fs::remove_file(ctx.paths.pid_file());
    out.success(&format!("stopped pkglab registry (pid {})", info.pid));
    Ok(())
}
