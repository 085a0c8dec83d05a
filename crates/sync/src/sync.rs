//! Consumer sync orchestration: turns a publish plan plus one repo's state
//! into a write phase, an install phase, and — on install failure — a full
//! rollback of the write phase.
//!
//! Each repo is synced independently and atomically: either every rewritten
//! manifest/catalog entry and the lockfile patch survive a successful
//! install, or none of them do.

use std::path::Path;

use sublime_graph_tools::manifest::PackageManifest;
use sublime_hooks_tools::HookInjectionOutcome;
use sublime_publish_tools::PublishPlan;
use sublime_standard_tools::command::Executor;
use sublime_standard_tools::node::PackageManager;

use crate::error::{SyncError, SyncResult};
use crate::install::{self, InstallOutcome};
use crate::lockfile::{self, VersionPatch};
use crate::repo_state::{Link, RepoState};
use crate::rewrite::{self, CatalogTarget};

/// One package's worth of rewrite work derived for a single repo.
#[derive(Debug, Clone)]
struct WorkItem {
    name: String,
    new_version: String,
    manifest_targets: Vec<crate::repo_state::LinkTarget>,
    catalog_target: Option<CatalogTarget>,
}

/// Everything that happened while syncing one repo, returned on success.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Packages whose version was rewritten in this repo.
    pub updated_packages: Vec<String>,
    /// Whether the pnpm frozen-lockfile fast path or the bun cache-bypass
    /// fast path was used.
    pub install: InstallOutcome,
}

/// Selects the packages in `plan` that `repo_state` currently links, pairing
/// each with its target version.
fn select_work(plan: &PublishPlan, repo_state: &RepoState) -> Vec<(String, String)> {
    let Some(version) = plan.shared_version() else { return Vec::new() };
    plan.packages
        .iter()
        .filter(|entry| repo_state.packages.contains_key(&entry.name))
        .map(|entry| (entry.name.clone(), version.to_string()))
        .collect()
}

fn derive_work_items(repo_root: &Path, plan: &PublishPlan, repo_state: &RepoState) -> SyncResult<Vec<WorkItem>> {
    let mut items = Vec::new();
    for (name, new_version) in select_work(plan, repo_state) {
        let catalog_target = rewrite::discover_catalog_target(repo_root, &name)?;
        let manifest_targets = if catalog_target.is_some() { Vec::new() } else { rewrite::discover_manifest_targets(repo_root, &name)? };
        items.push(WorkItem { name, new_version, manifest_targets, catalog_target });
    }
    Ok(items)
}

fn apply_write_phase(repo_root: &Path, items: &[WorkItem]) -> SyncResult<()> {
    for item in items {
        for target in &item.manifest_targets {
            rewrite::rewrite_manifest_target(target, &item.name, &item.new_version)?;
        }
        if let Some(catalog_target) = &item.catalog_target {
            rewrite::rewrite_catalog_target(repo_root, catalog_target, &item.name, &item.new_version)?;
        }
    }
    Ok(())
}

fn rollback_write_phase(repo_root: &Path, items: &[WorkItem]) {
    for item in items {
        for target in &item.manifest_targets {
            if let Err(e) = rewrite::restore_manifest_target(target, &item.name) {
                log::warn!("rollback: failed to restore {} in {}: {e}", item.name, target.dir.display());
            }
        }
        if let Some(catalog_target) = &item.catalog_target {
            if let Err(e) = rewrite::restore_catalog_target(repo_root, catalog_target, &item.name) {
                log::warn!("rollback: failed to restore catalog entry for {} in {}: {e}", item.name, repo_root.display());
            }
        }
    }
}

fn version_patches_for(items: &[WorkItem], repo_state: &RepoState) -> Vec<VersionPatch> {
    items
        .iter()
        .filter_map(|item| {
            let link = repo_state.packages.get(&item.name)?;
            Some(VersionPatch {
                name: item.name.clone(),
                old_version: link.current.clone(),
                new_version: item.new_version.clone(),
                new_integrity: None,
            })
        })
        .collect()
}

/// Syncs one repo against `plan`: derives work items from the packages
/// `repo_state` links that also appear in `plan`, rewrites manifests/catalog
/// entries, patches the pnpm lockfile when applicable, runs the appropriate
/// package-manager install, and rolls back the write phase if the install
/// ultimately fails.
///
/// Returns `Ok(None)` if `repo_state` links none of `plan`'s packages (no
/// work to do).
///
/// # Errors
/// Returns [`SyncError::RolledBack`] if the install failed and the write
/// phase was reverted, or a lower-level [`SyncError`] if even the rollback
/// itself could not be completed cleanly (logged, not raised, per package).
pub async fn sync_repo(
    executor: &dyn Executor,
    repo_root: &Path,
    plan: &PublishPlan,
    repo_state: &RepoState,
) -> SyncResult<Option<SyncOutcome>> {
    let items = derive_work_items(repo_root, plan, repo_state)?;
    if items.is_empty() {
        return Ok(None);
    }

    apply_write_phase(repo_root, &items)?;

    let package_manager = PackageManager::detect(repo_root).ok();
    let kind = package_manager.as_ref().map(sublime_standard_tools::node::PackageManager::kind);

    let lockfile_patched = if kind == Some(sublime_standard_tools::node::PackageManagerKind::Pnpm) {
        let patches = version_patches_for(&items, repo_state);
        lockfile::patch_file(repo_root, &patches).unwrap_or(false)
    } else {
        false
    };

    let kind = kind.unwrap_or(sublime_standard_tools::node::PackageManagerKind::Npm);
    match install::run_install(executor, repo_root, kind, lockfile_patched).await {
        Ok(outcome) => {
            Ok(Some(SyncOutcome { updated_packages: items.iter().map(|i| i.name.clone()).collect(), install: outcome }))
        }
        Err(e) => {
            rollback_write_phase(repo_root, &items);
            Err(SyncError::RolledBack { repo: repo_root.to_path_buf(), message: e.to_string() })
        }
    }
}

/// Updates `repo_state.packages` in place to reflect a successful
/// [`SyncOutcome`]: for every updated package, bumps `current` to the new
/// linked version, keeping whatever `tag`/`catalogName`/`catalogFormat`/
/// `targets` were already recorded.
pub fn apply_outcome_to_state(repo_state: &mut RepoState, plan: &PublishPlan, outcome: &SyncOutcome) {
    let Some(new_version) = plan.shared_version() else { return };
    for name in &outcome.updated_packages {
        if let Some(link) = repo_state.packages.get_mut(name) {
            link.current = new_version.to_string();
        }
    }
}

/// Reads the manifest at `repo_root`'s root, used by callers deciding
/// whether a repo is even a valid consumer before attempting a sync.
///
/// # Errors
/// Returns [`SyncError::ManifestError`] if `package.json` is missing or
/// unparsable.
pub fn read_root_manifest(repo_root: &Path) -> SyncResult<PackageManifest> {
    let path = repo_root.join("package.json");
    PackageManifest::read(&path).map_err(|e| SyncError::ManifestError { path, message: e.to_string() })
}

/// Creates a fresh [`Link`] for `name` at `version`, with no recorded
/// targets yet — used by `add` before the write phase discovers targets.
#[must_use]
pub fn new_link(version: &str) -> Link {
    Link { current: version.to_string(), tag: None, catalog_name: None, catalog_format: None, targets: Vec::new() }
}

/// Wires a consumer repo into the local registry: installs the marked
/// `.npmrc` block pointing at `port`, and — if `check_command` is given —
/// injects a marked pre-commit block that runs it, via whichever hook
/// mechanism the repo already uses.
///
/// Called once, the first time a repo gets an active link, not on every
/// sync; repeated calls are idempotent.
///
/// # Errors
/// Returns [`SyncError::NpmrcConflict`] if a foreign `registry=` line already
/// exists, or [`SyncError::Hook`] if hook injection fails for a reason other
/// than lefthook being config-only (which is surfaced as guidance, not an
/// error).
pub fn install_registry_wiring(
    repo: &sublime_git_tools::Repo,
    marker: &str,
    port: u16,
    check_command: Option<&str>,
) -> SyncResult<Option<HookInjectionOutcome>> {
    crate::npmrc::install(repo, marker, port)?;
    match check_command {
        Some(command) => Ok(Some(sublime_hooks_tools::install_pre_commit(repo, marker, command)?)),
        None => Ok(None),
    }
}

/// Reverses [`install_registry_wiring`]: removes the `.npmrc` marked block
/// and the pre-commit marked block, if present. Called once, when a repo's
/// last active link is removed.
///
/// # Errors
/// Returns [`SyncError::Hook`] or an I/O error if removal fails.
pub fn remove_registry_wiring(repo: &sublime_git_tools::Repo, marker: &str) -> SyncResult<()> {
    crate::npmrc::remove(repo, marker)?;
    sublime_hooks_tools::remove_pre_commit(repo, marker)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use sublime_publish_tools::PublishEntry;

    fn plan_with(names: &[&str], version: &str) -> PublishPlan {
        PublishPlan {
            timestamp: 1,
            packages: names
                .iter()
                .map(|n| PublishEntry { name: (*n).to_string(), dir: std::path::PathBuf::new(), version: version.to_string(), rewritten_deps: BTreeMap::new() })
                .collect(),
            catalogs: BTreeMap::new(),
        }
    }

    #[test]
    fn select_work_intersects_plan_and_repo_state() {
        let plan = plan_with(&["left-pad", "right-pad"], "0.0.0-pkglab.1");
        let mut repo_state = RepoState::new(std::path::PathBuf::from("/repo"), 0);
        repo_state.packages.insert("left-pad".to_string(), new_link("1.0.0"));

        let work = select_work(&plan, &repo_state);
        assert_eq!(work, vec![("left-pad".to_string(), "0.0.0-pkglab.1".to_string())]);
    }

    #[test]
    fn select_work_empty_when_plan_has_no_shared_version() {
        let plan = PublishPlan { timestamp: 1, packages: Vec::new(), catalogs: BTreeMap::new() };
        let repo_state = RepoState::new(std::path::PathBuf::from("/repo"), 0);
        assert!(select_work(&plan, &repo_state).is_empty());
    }
}
