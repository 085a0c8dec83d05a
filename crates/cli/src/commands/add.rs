//! `pub add`: links one or more registry packages into the current repo.
//!
//! For each package, finds every manifest (plain dependency entry or pnpm
//! catalog entry) that references it, rewrites the reference to the
//! currently-tagged registry version, and records a [`Link`] so `restore`
//! can undo it later. The first time a repo gets an active link, also wires
//! the `.npmrc` registry block (and, if asked, a pre-commit hook).

use std::path::Path;

use sublime_sync_tools::repo_state::{Link, LinkTarget, RepoState};

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

async fn tagged_version(ctx: &CliContext, name: &str, tag: Option<&str>) -> CliResult<String> {
    let url = format!("{}/{name}", ctx.registry_url());
    let response = ctx.client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(CliError::RegistryRejected(format!("{name} is not published on the local registry")));
    }
    let packument: sublime_registry::Packument = response.json().await?;
    let tag_name = tag.unwrap_or("latest");
    packument
        .dist_tags
        .get(tag_name)
        .cloned()
        .ok_or_else(|| CliError::RegistryRejected(format!("{name} has no dist-tag '{tag_name}'")))
}

fn link_for(canonical: &Path, name: &str, version: &str, tag: Option<&str>) -> CliResult<Option<Link>> {
    let manifest_targets = sublime_sync_tools::rewrite::discover_manifest_targets(canonical, name)?;
    if !manifest_targets.is_empty() {
        for target in &manifest_targets {
            sublime_sync_tools::rewrite::rewrite_manifest_target(target, name, version)?;
        }
        let mut link = sublime_sync_tools::new_link(version);
        link.tag = tag.map(str::to_string);
        link.targets = manifest_targets;
        return Ok(Some(link));
    }

    if let Some(catalog_target) = sublime_sync_tools::rewrite::discover_catalog_target(canonical, name)? {
        sublime_sync_tools::rewrite::rewrite_catalog_target(canonical, &catalog_target, name, version)?;
        let mut link = sublime_sync_tools::new_link(version);
        link.tag = tag.map(str::to_string);
        link.catalog_name = Some(catalog_target.catalog_name.clone());
        link.catalog_format = Some(catalog_target.format);
        link.targets = vec![LinkTarget { dir: canonical.to_path_buf(), original: catalog_target.original.clone() }];
        return Ok(Some(link));
    }

    Ok(None)
}

/// Links `names` (or every publishable workspace package, if empty) into the
/// repo at the current directory.
///
/// # Errors
/// Returns [`CliError::NoWorkspace`] if `names` is empty and no workspace
/// can be discovered, or a wrapped registry/sync error for any package.
pub async fn run(
    ctx: &CliContext,
    out: &OutputManager,
    names: &[String],
    tag: Option<&str>,
    hook_check_command: Option<&str>,
) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| CliError::Io(e.to_string()))?;
    let canonical = cwd.canonicalize().map_err(|e| CliError::Io(e.to_string()))?;

    let resolved_names: Vec<String> = if names.is_empty() {
        let workspace = sublime_graph_tools::discover(&cwd).map_err(|e| CliError::from_discovery(e, &cwd))?;
        workspace.packages.iter().filter(|p| p.publishable()).map(|p| p.name.clone()).collect()
    } else {
        names.to_vec()
    };

    if resolved_names.is_empty() {
        out.warn("nothing to link");
        return Ok(());
    }

    let repos_dir = ctx.paths.repos_dir();
    let mut repo_state = sublime_sync_tools::repo_state::load_by_path(&repos_dir, &canonical)?
        .unwrap_or_else(|| RepoState::new(canonical.clone(), sublime_sync_tools::repo_state::now_ms()));
    let was_active = repo_state.active;

    for name in &resolved_names {
        let version = tagged_version(ctx, name, tag).await?;
        match link_for(&canonical, name, &version, tag)? {
            Some(link) => {
                repo_state.packages.insert(name.clone(), link);
                out.success(&format!("linked {name}@{version}"));
            }
            None => out.warn(&format!("{name} isn't referenced by any manifest or catalog in this repo; nothing to link")),
        }
    }

    repo_state.active = true;
    repo_state.last_used = sublime_sync_tools::repo_state::now_ms();
    sublime_sync_tools::repo_state::save(&repos_dir, &repo_state)?;

    if let Some(repo) = sublime_git_tools::Repo::discover(&canonical) {
        if !was_active {
            let outcome = sublime_sync_tools::install_registry_wiring(
                &repo,
                sublime_version_tools::DEFAULT_MARKER,
                ctx.config.port,
                hook_check_command,
            )?;
            if let Some(outcome) = outcome {
                report_hook_outcome(out, &outcome);
            }
            out.success("wired .npmrc for this repo");
        } else if let Some(command) = hook_check_command {
            let outcome = sublime_hooks_tools::install_pre_commit(&repo, sublime_version_tools::DEFAULT_MARKER, command)?;
            report_hook_outcome(out, &outcome);
        }
    }

    Ok(())
}

fn report_hook_outcome(out: &OutputManager, outcome: &sublime_hooks_tools::HookInjectionOutcome) {
    match outcome {
        sublime_hooks_tools::HookInjectionOutcome::Installed(path) => {
            out.success(&format!("installed pre-commit hook at {}", path.display()));
        }
        sublime_hooks_tools::HookInjectionOutcome::LefthookGuidance(path) => {
            out.info(&format!("this repo uses lefthook; add the check command to {}", path.display()));
        }
    }
}
