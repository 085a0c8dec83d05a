//! `pub` (bare invocation) and `pub pub`: the publish pipeline.
//!
//! Acquires the cross-process publish lock, discovers the workspace at the
//! current directory, fingerprints the explicit targets to decide what
//! actually changed, runs the cascade (or a flat topological sort for
//! `--single`), synthesizes one shared marker version, builds and executes
//! the plan, then fans the result out to every active consumer repo.

use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sublime_fingerprint_tools::{Fingerprint, FingerprintKey, FingerprintRecord, FingerprintState};
use sublime_graph_tools::{CascadeInput, DependencyGraph, WorkspacePackage};
use sublime_publish_tools::{build_plan, execute_plan, ExecutionOutcome};

use crate::args::PublishArgs;
use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// Holds the cross-process `publish.lock` file for the lifetime of one
/// publish, removing it on every exit path (success, failure, or an early
/// return via `?`).
struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    fn acquire(path: PathBuf) -> CliResult<Self> {
        match std::fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(CliError::LockHeld(path.display().to_string())),
            Err(e) => Err(CliError::Io(e.to_string())),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

/// Computes (or reuses, via the mtime/size fast path) a target's fingerprint
/// and whether its content changed since the last recorded run.
fn fingerprint_target(
    pkg: &WorkspacePackage,
    workspace_root: &str,
    tag: Option<&str>,
    state: &FingerprintState,
) -> CliResult<(FingerprintKey, Fingerprint, bool)> {
    let key = FingerprintKey::new(workspace_root, pkg.name.clone(), tag);
    let previous = state.get(&key).map(|record| record.fingerprint.clone());
    let files = sublime_fingerprint_tools::select_publish_files(&pkg.dir, &pkg.manifest)?;
    let fingerprint = sublime_fingerprint_tools::fingerprint(&pkg.dir, &files, previous.as_ref())?;
    let changed = previous.as_ref().map(|p| p.hash != fingerprint.hash).unwrap_or(true);
    Ok((key, fingerprint, changed))
}

/// Runs a publish: bare `pub` and `pub pub` both land here with the same
/// [`PublishArgs`].
pub async fn run(ctx: &CliContext, out: &OutputManager, args: &PublishArgs) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| CliError::Io(e.to_string()))?;
    let workspace = sublime_graph_tools::discover(&cwd).map_err(|e| CliError::from_discovery(e, &cwd))?;
    let graph = DependencyGraph::build(&workspace);

    let _lock = LockGuard::acquire(ctx.paths.publish_lock_file())?;

    let by_name: BTreeMap<String, &WorkspacePackage> =
        workspace.packages.iter().map(|p| (p.name.clone(), p)).collect();

    let explicit_targets: BTreeSet<String> = if args.root || args.targets.is_empty() {
        workspace.packages.iter().filter(|p| p.publishable()).map(|p| p.name.clone()).collect()
    } else {
        args.targets.iter().cloned().collect()
    };

    if explicit_targets.is_empty() {
        out.warn("no publishable packages found in this workspace");
        return Ok(());
    }

    for name in &explicit_targets {
        if !graph.contains(name) {
            return Err(CliError::InvalidArgs(format!("'{name}' is not a package in this workspace")));
        }
    }

    let fingerprints_path = ctx.paths.fingerprints_file();
    let mut fp_state = FingerprintState::load(&fingerprints_path)?;
    let workspace_root = workspace.root.to_string_lossy().into_owned();

    let mut pending_fingerprints: BTreeMap<String, (FingerprintKey, Fingerprint)> = BTreeMap::new();
    let mut changed: BTreeSet<String> = BTreeSet::new();
    for name in &explicit_targets {
        let pkg = by_name.get(name).expect("explicit target resolved against the workspace above");
        let (key, fingerprint, is_changed) =
            fingerprint_target(pkg, &workspace_root, args.tag.as_deref(), &fp_state)?;
        if args.force || is_changed {
            changed.insert(name.clone());
        }
        pending_fingerprints.insert(name.clone(), (key, fingerprint));
    }

    if changed.is_empty() {
        out.info("nothing changed; every target is already up to date");
        return Ok(());
    }

    let order = if args.single {
        sublime_graph_tools::topo_sort(&graph, &explicit_targets)?
    } else {
        let changed_for_cascade = if args.shallow { BTreeSet::new() } else { changed.clone() };
        let consumer_filter = if args.shallow {
            None
        } else {
            let active_repos = sublime_sync_tools::repo_state::active_repos(&ctx.paths.repos_dir())?;
            Some(active_repos.iter().flat_map(|r| r.packages.keys().cloned()).collect::<BTreeSet<String>>())
        };
        let plan = sublime_graph_tools::compute_cascade(
            &graph,
            CascadeInput { targets: explicit_targets.clone(), changed: changed_for_cascade, consumer_filter },
        )?;
        for skipped in &plan.skipped_dependents {
            out.info(&format!("skipping {} (not an active consumer of {})", skipped.name, skipped.via));
        }
        plan.order
    };

    let publishable_order: Vec<String> = order.into_iter().filter(|name| graph.is_publishable(name)).collect();
    if publishable_order.is_empty() {
        out.warn("nothing publishable in the cascade scope");
        return Ok(());
    }

    let issuer = sublime_version_tools::VersionIssuer::new(sublime_version_tools::DEFAULT_MARKER);
    let timestamp = now_ms();
    let version = issuer.synthesize(timestamp, args.tag.as_deref())?;

    let plan = build_plan(&workspace, &graph, &publishable_order, &version, timestamp);

    out.section("publish plan");
    for entry in &plan.packages {
        out.info(&format!("{} -> {}", entry.name, entry.version));
    }

    if args.dry_run {
        out.info("dry run: nothing published");
        return Ok(());
    }

    let registry_url = ctx.registry_url();
    match execute_plan(&ctx.client, &registry_url, &plan, None).await {
        ExecutionOutcome::Success { published } => {
            for entry in &published {
                out.success(&format!("published {}@{}", entry.name, entry.version));
            }
        }
        ExecutionOutcome::Failed { cause, rolled_back, rollback_failures } => {
            out.warn(&format!("rolled back {} already-published entries", rolled_back.len()));
            for failure in &rollback_failures {
                out.error(&format!("rollback failed: {failure}"));
            }
            return Err(CliError::Publish(cause));
        }
    }

    if let Some(tag) = &args.tag {
        for entry in &plan.packages {
            let url = format!("{registry_url}/-/package/{}/dist-tags/{tag}", entry.name);
            match ctx.client.put(&url).json(&entry.version).send().await {
                Ok(response) if response.status().is_success() => {}
                _ => out.warn(&format!("failed to set tag '{tag}' for {}", entry.name)),
            }
        }
    }

    for name in &explicit_targets {
        if let Some((key, fingerprint)) = pending_fingerprints.remove(name) {
            fp_state.set(&key, FingerprintRecord { version: version.clone(), fingerprint });
        }
    }
    fp_state.save(&fingerprints_path)?;

    let repos_dir = ctx.paths.repos_dir();
    let active_repos = sublime_sync_tools::repo_state::active_repos(&repos_dir)?;
    let executor = sublime_standard_tools::command::DefaultCommandExecutor::new();
    for mut repo_state in active_repos {
        let repo_root = repo_state.path.clone();
        match sublime_sync_tools::sync_repo(&executor, &repo_root, &plan, &repo_state).await {
            Ok(Some(sync_outcome)) => {
                sublime_sync_tools::sync::apply_outcome_to_state(&mut repo_state, &plan, &sync_outcome);
                sublime_sync_tools::repo_state::save(&repos_dir, &repo_state)?;
                out.success(&format!("synced {}", repo_state.display_name()));
            }
            Ok(None) => {}
            Err(e) => out.warn(&format!("sync failed for {}: {e}", repo_state.display_name())),
        }
    }

    Ok(())
}
