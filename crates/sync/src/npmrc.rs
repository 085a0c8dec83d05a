//! `.npmrc` marker-block management for consumer repos.
//!
//! Mirrors `sublime_hooks_tools::inject`'s marked-block idiom (`# <marker>-start`
//! / `# <marker>-end`) applied to a single `registry=` line instead of a
//! check command, plus a `git update-index --skip-worktree` toggle so the
//! injected line never shows up in the consumer's own `git status`.

use std::fs;
use std::path::{Path, PathBuf};

use sublime_git_tools::Repo;

use crate::error::{SyncError, SyncResult};

const MARKER_START_SUFFIX: &str = "-start";
const MARKER_END_SUFFIX: &str = "-end";

fn registry_line(port: u16) -> String {
    format!("registry=http://127.0.0.1:{port}")
}

fn marker_block(marker: &str, port: u16) -> (String, String, String) {
    let start = format!("# {marker}{MARKER_START_SUFFIX}");
    let end = format!("# {marker}{MARKER_END_SUFFIX}");
    let body = format!("{start}\n{}\n{end}\n", registry_line(port));
    (start, end, body)
}

fn contains_marker(content: &str, start: &str) -> bool {
    content.lines().any(|line| line.trim() == start)
}

/// Whether a non-loopback `registry=` line exists outside `start`/`end`'s
/// marked block.
fn foreign_registry_line(content: &str, start: &str, end: &str) -> Option<String> {
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
        if inside_block {
            continue;
        }
        if let Some(value) = trimmed.strip_prefix("registry=") {
            if !value.contains("127.0.0.1") && !value.contains("localhost") {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Installs (idempotently) a marked `registry=http://127.0.0.1:<port>` block
/// in `repo_root/.npmrc`, then applies `git update-index --skip-worktree` to
/// the file if it's tracked.
///
/// # Errors
/// Returns [`SyncError::NpmrcConflict`] if an unrelated non-loopback
/// `registry=` line already exists outside the marked block, or
/// [`SyncError::Io`] on filesystem failure.
pub fn install(repo: &Repo, marker: &str, port: u16) -> SyncResult<PathBuf> {
    let path = repo.get_repo_path().join(".npmrc");
    let (start, end, block) = marker_block(marker, port);

    let existing = if path.is_file() {
        fs::read_to_string(&path).map_err(|e| SyncError::Io { path: path.clone(), message: e.to_string() })?
    } else {
        String::new()
    };

    if contains_marker(&existing, &start) {
        apply_skip_worktree(repo, &path, true)?;
        return Ok(path);
    }

    if let Some(existing_line) = foreign_registry_line(&existing, &start, &end) {
        return Err(SyncError::NpmrcConflict { path, existing: existing_line });
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&block);

    fs::write(&path, &updated).map_err(|e| SyncError::Io { path: path.clone(), message: e.to_string() })?;
    apply_skip_worktree(repo, &path, true)?;
    Ok(path)
}

/// Removes the marked block installed by [`install`] and clears the
/// `skip-worktree` flag, leaving the rest of `.npmrc` untouched. A no-op if
/// the file doesn't exist or carries no marker block.
///
/// # Errors
/// Returns [`SyncError::Io`] on filesystem failure.
pub fn remove(repo: &Repo, marker: &str) -> SyncResult<()> {
    let path = repo.get_repo_path().join(".npmrc");
    if !path.is_file() {
        return Ok(());
    }

    let content = fs::read_to_string(&path).map_err(|e| SyncError::Io { path: path.clone(), message: e.to_string() })?;
    let start = format!("# {marker}{MARKER_START_SUFFIX}");
    let end = format!("# {marker}{MARKER_END_SUFFIX}");

    if !contains_marker(&content, &start) {
        return Ok(());
    }

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

    fs::write(&path, result).map_err(|e| SyncError::Io { path: path.clone(), message: e.to_string() })?;
    apply_skip_worktree(repo, &path, false)?;
    Ok(())
}

fn apply_skip_worktree(repo: &Repo, path: &Path, skip: bool) -> SyncResult<()> {
    let relative = path.strip_prefix(repo.get_repo_path()).unwrap_or(path);
    let relative = relative.to_string_lossy();
    if repo.is_tracked(&relative)? {
        repo.set_skip_worktree(&relative, skip)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_line_uses_loopback() {
        assert_eq!(registry_line(4873), "registry=http://127.0.0.1:4873");
    }

    #[test]
    fn foreign_registry_line_ignores_marked_block() {
        let (start, end, block) = marker_block("pkglab", 4873);
        assert!(foreign_registry_line(&block, &start, &end).is_none());
    }

    #[test]
    fn foreign_registry_line_detects_non_loopback() {
        let content = "registry=https://registry.npmjs.org\n";
        assert_eq!(foreign_registry_line(content, "# pkglab-start", "# pkglab-end"), Some("registry=https://registry.npmjs.org".to_string()));
    }

    #[test]
    fn contains_marker_detects_existing_block() {
        let (start, _end, block) = marker_block("pkglab", 4873);
        assert!(contains_marker(&block, &start));
    }
}
