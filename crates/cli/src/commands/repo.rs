//! `pub repo`: manage consumer repos known to pkglab.

use std::path::{Path, PathBuf};

use tabled::Tabled;

use sublime_sync_tools::repo_state::RepoState;

use crate::args::RepoAction;
use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[derive(Tabled)]
struct RepoRow {
    name: String,
    path: String,
    active: String,
    linked: String,
}

fn resolve_path(path: Option<String>) -> CliResult<PathBuf> {
    let raw = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().map_err(|e| CliError::Io(e.to_string()))?,
    };
    raw.canonicalize().map_err(|e| CliError::Io(e.to_string()))
}

fn display_name_for(path: &Path) -> String {
    RepoState::new(path.to_path_buf(), 0).display_name()
}

/// Dispatches a `pub repo` subcommand.
///
/// # Errors
/// Returns a wrapped sync error if a repo sidecar can't be read, written, or
/// removed.
pub fn run(ctx: &CliContext, out: &OutputManager, action: RepoAction) -> CliResult<()> {
    let repos_dir = ctx.paths.repos_dir();
    match action {
        RepoAction::Ls => {
            let repos = sublime_sync_tools::repo_state::load_all(&repos_dir)?;
            let rows = repos
                .into_iter()
                .map(|r| RepoRow {
                    name: r.display_name(),
                    path: r.path.display().to_string(),
                    active: if r.active { "yes".to_string() } else { "no".to_string() },
                    linked: r.packages.len().to_string(),
                })
                .collect();
            out.table(rows, "no repos known to pkglab yet");
        }
        RepoAction::On { path } => {
            let canonical = resolve_path(path)?;
            sublime_sync_tools::repo_state::set_active(&repos_dir, &canonical, true)?;
            out.success(&format!("activated {}", display_name_for(&canonical)));
        }
        RepoAction::Off { path } => {
            let canonical = resolve_path(path)?;
            sublime_sync_tools::repo_state::set_active(&repos_dir, &canonical, false)?;
            out.success(&format!("deactivated {}", display_name_for(&canonical)));
        }
        RepoAction::Reset { path } => {
            let canonical = resolve_path(path)?;
            sublime_sync_tools::repo_state::delete_by_path(&repos_dir, &canonical)?;
            out.success(&format!("forgot {}", display_name_for(&canonical)));
        }
        RepoAction::Rename { path } => {
            let canonical = resolve_path(path)?;
            out.info(&display_name_for(&canonical));
        }
    }
    Ok(())
}
