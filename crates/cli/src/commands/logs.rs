//! `pub logs`: tails the daemon's log file.

use std::collections::VecDeque;

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// Prints the last `lines` lines of `<home>/daemon.log`.
pub fn run(ctx: &CliContext, out: &OutputManager, lines: usize) -> CliResult<()> {
    let path = ctx.paths.daemon_log_file();
    if !path.is_file() {
        out.info("no daemon log yet; has `pub up` been run?");
        return Ok(());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| CliError::Io(e.to_string()))?;

    let mut tail: VecDeque<&str> = VecDeque::with_capacity(lines);
    for line in contents.lines() {
        if tail.len() == lines {
            tail.pop_front();
        }
        tail.push_back(line);
    }
    for line in tail {
        out.info(line);
    }
    Ok(())
}
