//! `pub reset`: wipes pkglab's home directory entirely.
#![allow(clippy::print_stdout)]

use std::io::Write;
use std::time::Duration;

use sublime_standard_tools::process;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::OutputManager;

const STOP_GRACE: Duration = Duration::from_secs(5);

fn confirmed() -> bool {
    print!("this will remove pkglab's entire home directory (storage, repos, fingerprints, config) - continue? [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Stops the daemon if running, then removes `<home>` and everything under
/// it. Prompts for confirmation unless `yes` is set.
///
/// # Errors
/// Returns a wrapped I/O error if the home directory can't be removed.
pub fn run(ctx: &CliContext, out: &OutputManager, yes: bool) -> CliResult<()> {
    if !yes && !confirmed() {
        out.info("aborted");
        return Ok(());
    }

    if let Some(info) = ctx.read_pid() {
        if process::is_alive(info.pid) {
            process::stop_gracefully(info.pid, STOP_GRACE).map_err(|e| crate::error::CliError::Standard(e.into()))?;
            out.info(&format!("stopped pkglab registry (pid {})", info.pid));
        }
    }

    let home = ctx.paths.home();
    if home.exists() {
        std::fs::remove_dir_all(home).map_err(|e| crate::error::CliError::Io(e.to_string()))?;
    }
    out.success(&format!("removed {}", home.display()));
    Ok(())
}
