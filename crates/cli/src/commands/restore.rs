//! `pub restore`: reverses `add`, putting back the version ranges pkglab
//! overwrote when linking a package.

use sublime_sync_tools::rewrite::CatalogTarget;

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

fn restore_one(canonical: &std::path::Path, name: &str, link: &sublime_sync_tools::repo_state::Link) -> CliResult<()> {
    if let (Some(catalog_name), Some(format)) = (&link.catalog_name, link.catalog_format) {
        let Some(synthetic) = link.targets.first() else { return Ok(()) };
        let catalog_target = CatalogTarget { format, catalog_name: catalog_name.clone(), original: synthetic.original.clone() };
        sublime_sync_tools::rewrite::restore_catalog_target(canonical, &catalog_target, name)?;
        return Ok(());
    }
    for target in &link.targets {
        sublime_sync_tools::rewrite::restore_manifest_target(target, name)?;
    }
    Ok(())
}

/// Restores `names` (or every linked package, if empty) in the repo at the
/// current directory. With `all`, also tears down the `.npmrc`/hook wiring
/// and forgets the repo's state entirely.
///
/// # Errors
/// Returns a wrapped sync error if a manifest or catalog file can't be
/// rewritten.
pub fn run(ctx: &CliContext, out: &OutputManager, names: &[String], all: bool) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| CliError::Io(e.to_string()))?;
    let canonical = cwd.canonicalize().map_err(|e| CliError::Io(e.to_string()))?;

    let repos_dir = ctx.paths.repos_dir();
    let Some(mut repo_state) = sublime_sync_tools::repo_state::load_by_path(&repos_dir, &canonical)? else {
        out.warn("this repo has no packages linked");
        return Ok(());
    };

    let targets: Vec<String> =
        if names.is_empty() { repo_state.packages.keys().cloned().collect() } else { names.to_vec() };

    if targets.is_empty() {
        out.warn("nothing to restore");
        return Ok(());
    }

    for name in &targets {
        let Some(link) = repo_state.packages.get(name).cloned() else {
            out.warn(&format!("{name} isn't linked in this repo"));
            continue;
        };
        restore_one(&canonical, name, &link)?;
        repo_state.packages.remove(name);
        out.success(&format!("restored {name} to {}", link.targets.first().map(|t| t.original.as_str()).unwrap_or("its original range")));
    }

    if all {
        if let Some(repo) = sublime_git_tools::Repo::discover(&canonical) {
            sublime_sync_tools::remove_registry_wiring(&repo, sublime_version_tools::DEFAULT_MARKER)?;
        }
        sublime_sync_tools::repo_state::delete_by_path(&repos_dir, &canonical)?;
        out.success("removed this repo from pkglab");
    } else {
        sublime_sync_tools::repo_state::save(&repos_dir, &repo_state)?;
    }

    Ok(())
}
