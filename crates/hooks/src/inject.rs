//! Pre-commit hook injection: append a marked block that runs the repo's
//! check command to whichever hook mechanism is detected, in priority order
//! `.husky/pre-commit` → lefthook config → raw `.git/hooks/pre-commit`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use sublime_git_tools::{HookKind, Repo};

use crate::error::{HookError, HookResult};

const MARKER_START_SUFFIX: &str = "-start";
const MARKER_END_SUFFIX: &str = "-end";

fn marker_lines(marker: &str, check_command: &str) -> (String, String, String) {
    let start = format!("# {marker}{MARKER_START_SUFFIX}");
    let end = format!("# {marker}{MARKER_END_SUFFIX}");
    let body = format!("{start}\n{check_command}\n{end}\n");
    (start, end, body)
}

fn contains_marker(content: &str, start: &str) -> bool {
    content.lines().any(|line| line.trim() == start)
}

/// Where the pre-commit check command was installed, or guidance to show
/// the user when automatic installation isn't possible.
#[derive(Debug, Clone)]
pub enum HookInjectionOutcome {
    /// The marked block was written (or already present) at this path.
    Installed(PathBuf),
    /// Lefthook is config-only; this is the config file the user should edit.
    LefthookGuidance(PathBuf),
}

/// Installs a marked pre-commit block that runs `check_command`, using
/// whichever hook mechanism [`Repo::detect_hook_kind`] finds, in priority order.
///
/// Idempotent: if the marker block is already present, this is a no-op that
/// still returns `Installed`. Fails with [`HookError::MarkerConflict`] if a
/// *different* marker block already occupies the file (pkglab never edits
/// another tool's injected block).
///
/// # Errors
/// Returns [`HookError::NoHooksDirectory`] if no mechanism (and no
/// `.git/hooks` fallback) exists, or [`HookError::Io`] on filesystem failure.
pub fn install_pre_commit(repo: &Repo, marker: &str, check_command: &str) -> HookResult<HookInjectionOutcome> {
    match repo.detect_hook_kind() {
        Some(HookKind::Husky) => {
            let path = repo.get_repo_path().join(".husky").join("pre-commit");
            install_into_script(&path, marker, check_command, "#!/usr/bin/env sh\n")?;
            Ok(HookInjectionOutcome::Installed(path))
        }
        Some(HookKind::Lefthook) => {
            let config_path = lefthook_config_path(repo.get_repo_path())
                .ok_or_else(|| HookError::NoHooksDirectory { repo_root: repo.get_repo_path().to_path_buf() })?;
            Ok(HookInjectionOutcome::LefthookGuidance(config_path))
        }
        Some(HookKind::Raw) => {
            let path = repo.hooks_dir().join("pre-commit");
            install_into_script(&path, marker, check_command, "#!/usr/bin/env sh\n")?;
            Ok(HookInjectionOutcome::Installed(path))
        }
        None => Err(HookError::NoHooksDirectory { repo_root: repo.get_repo_path().to_path_buf() }),
    }
}

/// Removes the marked block installed by [`install_pre_commit`], leaving the
/// rest of the hook script untouched. A no-op if the marker isn't present.
///
/// # Errors
/// Returns [`HookError::Io`] on filesystem failure.
pub fn remove_pre_commit(repo: &Repo, marker: &str) -> HookResult<()> {
    for candidate in
        [repo.get_repo_path().join(".husky").join("pre-commit"), repo.hooks_dir().join("pre-commit")]
    {
        if candidate.is_file() {
            remove_marker_block(&candidate, marker)?;
        }
    }
    Ok(())
}

fn lefthook_config_path(repo_root: &Path) -> Option<PathBuf> {
    ["lefthook.yml", "lefthook.yaml", ".lefthook.yml", ".lefthook.yaml"]
        .into_iter()
        .map(|name| repo_root.join(name))
        .find(|path| path.is_file())
}

fn install_into_script(
    path: &Path,
    marker: &str,
    check_command: &str,
    shebang: &str,
) -> HookResult<()> {
    let (start, _end, block) = marker_lines(marker, check_command);

    let existing = if path.is_file() {
        fs::read_to_string(path)
            .map_err(|e| HookError::Io { path: path.to_path_buf(), message: e.to_string() })?
    } else {
        shebang.to_string()
    };

    if contains_marker(&existing, &start) {
        return Ok(());
    }
    if existing.lines().any(|line| line.trim().starts_with("# ") && line.trim().ends_with(MARKER_START_SUFFIX))
    {
        return Err(HookError::MarkerConflict { path: path.to_path_buf() });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| HookError::Io { path: parent.to_path_buf(), message: e.to_string() })?;
    }

    let mut updated = existing;
    if !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&block);

    fs::write(path, &updated).map_err(|e| HookError::Io { path: path.to_path_buf(), message: e.to_string() })?;

    #[cfg(unix)]
    {
        let mut perms =
            fs::metadata(path).map_err(|e| HookError::Io { path: path.to_path_buf(), message: e.to_string() })?.permissions();
        perms.set_mode(perms.mode() | 0o111);
        fs::set_permissions(path, perms)
            .map_err(|e| HookError::Io { path: path.to_path_buf(), message: e.to_string() })?;
    }

    Ok(())
}

fn remove_marker_block(path: &Path, marker: &str) -> HookResult<()> {
    let content =
        fs::read_to_string(path).map_err(|e| HookError::Io { path: path.to_path_buf(), message: e.to_string() })?;
    let start = format!("# {marker}{MARKER_START_SUFFIX}");
    let end = format!("# {marker}{MARKER_END_SUFFIX}");

    let mut result = String::new();
    let mut inside_block = false;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed == start {
            inside_block = true;
            continue;
        }
        if trimmed == end {
            inside_block = false;
            continue;
        }
        if !inside_block {
            result.push_str(line);
            result.push('\n');
        }
    }

    fs::write(path, result).map_err(|e| HookError::Io { path: path.to_path_buf(), message: e.to_string() })
}
