//! `pub hooks`: pre-commit hook management, independent of any linked
//! package (unlike the hook installed as a side effect of `add`).

use crate::args::HooksAction;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// Dispatches a `pub hooks` subcommand.
///
/// # Errors
/// Returns [`CliError::InvalidArgs`] if the current directory isn't inside a
/// Git working tree, or a wrapped [`sublime_hooks_tools::HookError`].
pub fn run(out: &OutputManager, action: HooksAction) -> CliResult<()> {
    match action {
        HooksAction::Init { check_command } => {
            let cwd = std::env::current_dir().map_err(|e| CliError::Io(e.to_string()))?;
            let repo = sublime_git_tools::Repo::discover(&cwd)
                .ok_or_else(|| CliError::InvalidArgs(format!("{} is not inside a git repository", cwd.display())))?;

            let outcome = sublime_hooks_tools::install_pre_commit(&repo, sublime_version_tools::DEFAULT_MARKER, &check_command)?;
            match outcome {
                sublime_hooks_tools::HookInjectionOutcome::Installed(path) => {
                    out.success(&format!("installed pre-commit hook at {}", path.display()));
                }
                sublime_hooks_tools::HookInjectionOutcome::LefthookGuidance(path) => {
                    out.info(&format!("this repo uses lefthook; add `{check_command}` to {}", path.display()));
                }
            }
        }
    }
    Ok(())
}
