//! Package-manager-specific install invocation: the last step of a consumer
//! sync, run after manifests/catalogs/lockfile have been rewritten.
//!
//! Every package manager gets `--ignore-scripts` first, with one retry
//! without the flag if that specific combination fails — some postinstall
//! scripts legitimately need to run and `--ignore-scripts` only exists to
//! avoid surprises from a synthetic version's scripts, not to hide real
//! failures.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sublime_standard_tools::command::{Command, CommandBuilder, Executor};
use sublime_standard_tools::error::Error as StandardError;
use sublime_standard_tools::node::PackageManagerKind;

use crate::error::{SyncError, SyncResult};
use crate::lockfile;

const INSTALL_TIMEOUT: Duration = Duration::from_secs(15 * 60);
const BUNFIG_MARKER: &str = "disableManifest = true";

/// The outcome of a successful install attempt, including whether the
/// `--ignore-scripts` fallback retry was needed.
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Whether the final successful attempt ran without `--ignore-scripts`.
    pub ran_scripts: bool,
    /// Whether a frozen-lockfile fast path was used (pnpm only).
    pub used_frozen_lockfile: bool,
}

fn standard_error_message(error: &StandardError) -> String {
    error.to_string()
}

async fn run(executor: &dyn Executor, command: Command) -> Result<(), String> {
    executor.execute(command).await.map(|_| ()).map_err(|e| standard_error_message(&e))
}

/// Runs the package-manager-appropriate install for `repo_root`, retrying
/// once without `--ignore-scripts` if the first attempt fails, per package
/// manager: pnpm gets a frozen-lockfile fast path (falling back to a full
/// install if the lockfile couldn't be patched), bun gets a manifest-cache
/// bypass via a temporary `bunfig.toml` edit plus a post-install scrub of
/// loopback URLs from `bun.lock`, npm/yarn get a plain install.
///
/// # Errors
/// Returns [`SyncError::InstallFailed`] if every attempt (including the
/// `--ignore-scripts` retry) exits non-zero.
pub async fn run_install(
    executor: &dyn Executor,
    repo_root: &Path,
    kind: PackageManagerKind,
    lockfile_patched: bool,
) -> SyncResult<InstallOutcome> {
    match kind {
        PackageManagerKind::Pnpm => install_pnpm(executor, repo_root, lockfile_patched).await,
        PackageManagerKind::Bun => install_bun(executor, repo_root).await,
        _ => install_plain(executor, repo_root, kind).await,
    }
}

async fn install_plain(executor: &dyn Executor, repo_root: &Path, kind: PackageManagerKind) -> SyncResult<InstallOutcome> {
    let program = kind.command();

    let with_ignore_scripts =
        CommandBuilder::new(program).arg("install").arg("--ignore-scripts").current_dir(repo_root).timeout(INSTALL_TIMEOUT).build();

    if run(executor, with_ignore_scripts).await.is_ok() {
        return Ok(InstallOutcome { ran_scripts: false, used_frozen_lockfile: false });
    }

    let without_ignore_scripts =
        CommandBuilder::new(program).arg("install").current_dir(repo_root).timeout(INSTALL_TIMEOUT).build();

    match run(executor, without_ignore_scripts).await {
        Ok(()) => Ok(InstallOutcome { ran_scripts: true, used_frozen_lockfile: false }),
        Err(message) => Err(SyncError::InstallFailed { repo: repo_root.to_path_buf(), message }),
    }
}

async fn install_pnpm(executor: &dyn Executor, repo_root: &Path, lockfile_patched: bool) -> SyncResult<InstallOutcome> {
    if lockfile_patched {
        let frozen = CommandBuilder::new("pnpm")
            .arg("install")
            .arg("--frozen-lockfile")
            .arg("--ignore-scripts")
            .arg("--prefer-offline")
            .current_dir(repo_root)
            .timeout(INSTALL_TIMEOUT)
            .build();

        if run(executor, frozen).await.is_ok() {
            return Ok(InstallOutcome { ran_scripts: false, used_frozen_lockfile: true });
        }
        log::warn!("pnpm frozen-lockfile install failed in {}; falling back to a full install", repo_root.display());
    }

    install_plain(executor, repo_root, PackageManagerKind::Pnpm).await
}

async fn install_bun(executor: &dyn Executor, repo_root: &Path) -> SyncResult<InstallOutcome> {
    let bunfig_path = repo_root.join("bunfig.toml");
    let original_bunfig = tokio::fs::read_to_string(&bunfig_path).await.ok();

    let patched = append_bunfig_disable_manifest(original_bunfig.as_deref());
    tokio::fs::write(&bunfig_path, &patched)
        .await
        .map_err(|e| SyncError::Io { path: bunfig_path.clone(), message: e.to_string() })?;

    let with_ignore_scripts = CommandBuilder::new("bun")
        .arg("install")
        .arg("--ignore-scripts")
        .arg("--prefer-offline")
        .current_dir(repo_root)
        .timeout(INSTALL_TIMEOUT)
        .build();

    let mut outcome = run(executor, with_ignore_scripts).await;
    if outcome.is_err() {
        let without_ignore_scripts =
            CommandBuilder::new("bun").arg("install").arg("--prefer-offline").current_dir(repo_root).timeout(INSTALL_TIMEOUT).build();
        outcome = run(executor, without_ignore_scripts).await;
    }

    restore_bunfig(&bunfig_path, original_bunfig.as_deref())
        .await
        .map_err(|e| SyncError::Io { path: bunfig_path.clone(), message: e.to_string() })?;

    match outcome {
        Ok(()) => {
            scrub_bun_lock(repo_root).await?;
            Ok(InstallOutcome { ran_scripts: false, used_frozen_lockfile: false })
        }
        Err(message) => Err(SyncError::InstallFailed { repo: repo_root.to_path_buf(), message }),
    }
}

fn append_bunfig_disable_manifest(original: Option<&str>) -> String {
    let base = original.unwrap_or_default();
    let mut patched = base.to_string();
    if !patched.is_empty() && !patched.ends_with('\n') {
        patched.push('\n');
    }
    patched.push_str("[install.cache]\n");
    patched.push_str(BUNFIG_MARKER);
    patched.push('\n');
    patched
}

async fn restore_bunfig(path: &PathBuf, original: Option<&str>) -> std::io::Result<()> {
    match original {
        Some(content) => tokio::fs::write(path, content).await,
        None => {
            if tokio::fs::metadata(path).await.is_ok() {
                tokio::fs::remove_file(path).await
            } else {
                Ok(())
            }
        }
    }
}

/// Removes any residual `http://127.0.0.1:...`/`http://localhost:...` URLs
/// bun's lockfile may have resolved tarballs against, so a committed
/// `bun.lock` never points at a developer's local registry.
async fn scrub_bun_lock(repo_root: &Path) -> SyncResult<()> {
    let path = repo_root.join("bun.lock");
    let Ok(content) = tokio::fs::read_to_string(&path).await else { return Ok(()) };
    if !content.contains("127.0.0.1") && !content.contains("localhost") {
        return Ok(());
    }
    let scrubbed = lockfile::scrub_loopback_urls(&content);
    tokio::fs::write(&path, scrubbed).await.map_err(|e| SyncError::Io { path, message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_bunfig_disable_manifest_creates_section_when_absent() {
        let patched = append_bunfig_disable_manifest(None);
        assert!(patched.contains("[install.cache]"));
        assert!(patched.contains(BUNFIG_MARKER));
    }

    #[test]
    fn append_bunfig_disable_manifest_preserves_existing_content() {
        let patched = append_bunfig_disable_manifest(Some("[install]\nexact = true\n"));
        assert!(patched.starts_with("[install]\nexact = true\n"));
        assert!(patched.contains(BUNFIG_MARKER));
    }
}
