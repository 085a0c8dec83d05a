//! `pub doctor`: checks environment prerequisites.

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::OutputManager;

fn on_path(program: &str) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else { return false };
    std::env::split_paths(&path_var).any(|dir| dir.join(program).is_file())
}

/// Checks that `node` is on `PATH`, reports which of `npm`/`pnpm`/`yarn`/
/// `bun` are available, and checks whether the registry daemon is reachable.
///
/// # Errors
/// Never directly; registry-reachability failures are reported as warnings,
/// not propagated, since `doctor` is meant to run even with nothing set up.
pub async fn run(ctx: &CliContext, out: &OutputManager) -> CliResult<()> {
    out.section("environment");
    if on_path("node") {
        out.success("node is on PATH");
    } else {
        out.warn("node was not found on PATH");
    }

    for manager in ["npm", "pnpm", "yarn", "bun"] {
        if on_path(manager) {
            out.success(&format!("{manager} is on PATH"));
        } else {
            out.info(&format!("{manager} is not on PATH"));
        }
    }

    out.section("registry");
    match ctx.read_pid() {
        Some(info) if sublime_standard_tools::process::is_alive(info.pid) => {
            let url = ctx.registry_url();
            match ctx.client.get(format!("{url}/-/ready")).send().await {
                Ok(response) if response.status().is_success() => {
                    out.success(&format!("registry reachable at {url} (pid {})", info.pid));
                }
                _ => out.warn(&format!("registry process is alive (pid {}) but not responding", info.pid)),
            }
        }
        Some(_) => out.warn("pid file is stale; the registry process is gone"),
        None => out.warn("the pkglab registry isn't running; run `pub up` first"),
    }

    Ok(())
}
