//! `pub prune`: unpublishes marker versions past the retention window.

use tabled::Tabled;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::OutputManager;

#[derive(Tabled)]
struct PruneRow {
    package: String,
    version: String,
    outcome: String,
}

/// Loads every active consumer repo, then prunes marker versions for every
/// `(package, tag)` past `config.prune_keep`, skipping any version still
/// referenced by an active consumer's current link.
///
/// # Errors
/// Returns a wrapped sync error if the active-repo scan itself fails.
pub async fn run(ctx: &CliContext, out: &OutputManager) -> CliResult<()> {
    let repos = sublime_sync_tools::repo_state::active_repos(&ctx.paths.repos_dir())?;
    let report = sublime_sync_tools::prune(
        &ctx.client,
        &ctx.registry_url(),
        sublime_version_tools::DEFAULT_MARKER,
        ctx.config.prune_keep as usize,
        &repos,
    )
    .await?;

    let mut rows = Vec::new();
    for pruned in &report.pruned {
        rows.push(PruneRow { package: pruned.name.clone(), version: pruned.version.clone(), outcome: "pruned".to_string() });
    }
    for kept in &report.kept_in_use {
        rows.push(PruneRow { package: kept.name.clone(), version: kept.version.clone(), outcome: "kept (in use)".to_string() });
    }
    for (failed, message) in &report.failures {
        rows.push(PruneRow { package: failed.name.clone(), version: failed.version.clone(), outcome: format!("failed: {message}") });
    }
    out.table(rows, "nothing to prune");

    if !report.failures.is_empty() {
        out.warn(&format!("{} version(s) could not be pruned", report.failures.len()));
    }
    Ok(())
}
