//! # Git Repository Module
//!
//! This module provides the operations pkglab's consumer sync engine needs
//! from a Git working tree: opening a repository, checking whether a path is
//! tracked, toggling the `skip-worktree` index flag, and locating which
//! pre-commit hook mechanism (if any) the repository uses.
//!
//! ## Examples
//!
//! ```no_run
//! use sublime_git_tools::Repo;
//!
//! let repo = Repo::open("./my-project").expect("Failed to open repository");
//! if repo.is_tracked(".npmrc").unwrap_or(false) {
//!     repo.set_skip_worktree(".npmrc", true).expect("Failed to set skip-worktree");
//! }
//! ```

use git2::{IndexAddOption, Repository, RepositoryOpenFlags, Status, StatusOptions};
use std::fs::canonicalize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{HookKind, Repo, RepoError};

fn canonicalize_path(path: &str) -> Result<PathBuf, RepoError> {
    canonicalize(path).map_err(RepoError::CanonicalPathFailure)
}

impl Repo {
    /// Opens an existing repository at `path`.
    ///
    /// # Errors
    /// Returns [`RepoError::OpenRepoFailure`] if `path` is not inside a Git
    /// working tree, or [`RepoError::CanonicalPathFailure`] if `path` cannot
    /// be resolved.
    pub fn open(path: &str) -> Result<Self, RepoError> {
        let canonical = canonicalize_path(path)?;
        let repo =
            Repository::open_ext(&canonical, RepositoryOpenFlags::empty(), Vec::<&Path>::new())
                .map_err(RepoError::OpenRepoFailure)?;
        let local_path = repo.workdir().map_or(canonical.clone(), Path::to_path_buf);
        Ok(Self { repo: Arc::new(repo), local_path })
    }

    /// Discovers the repository rooted at or above `path`, the way
    /// `git rev-parse --show-toplevel` would.
    ///
    /// Returns `None` if `path` is not inside a Git working tree.
    #[must_use]
    pub fn discover(path: &Path) -> Option<Self> {
        let repo = Repository::discover(path).ok()?;
        let local_path = repo.workdir().map_or_else(|| path.to_path_buf(), Path::to_path_buf);
        Some(Self { repo: Arc::new(repo), local_path })
    }

    /// The repository's working directory root.
    #[must_use]
    pub fn get_repo_path(&self) -> &Path {
        &self.local_path
    }

    fn relative_path(&self, file_path: &str) -> Result<PathBuf, RepoError> {
        let candidate = Path::new(file_path);
        let absolute = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.local_path.join(candidate)
        };
        absolute
            .strip_prefix(&self.local_path)
            .map(Path::to_path_buf)
            .map_err(|_| RepoError::PathOutsideWorkdir(absolute))
    }

    /// Checks whether `file_path` is tracked in the repository's index.
    ///
    /// Accepts either an absolute path or a path relative to the working
    /// directory root.
    ///
    /// # Errors
    /// Returns [`RepoError::IndexError`] if the index cannot be read, or
    /// [`RepoError::PathOutsideWorkdir`] if `file_path` is outside the
    /// working directory.
    pub fn is_tracked(&self, file_path: &str) -> Result<bool, RepoError> {
        let relative = self.relative_path(file_path)?;
        let index = self.repo.index().map_err(RepoError::IndexError)?;
        Ok(index.get_path(&relative, 0).is_some())
    }

    /// Sets or clears the `skip-worktree` flag on `file_path` in the index.
    ///
    /// Mirrors `git update-index --skip-worktree <path>` (or `--no-skip-worktree`
    /// when `skip` is `false`). The file must already be tracked.
    ///
    /// # Errors
    /// Returns [`RepoError::IndexError`] if `file_path` is not tracked, or
    /// [`RepoError::WriteIndexError`] if the updated index cannot be written.
    pub fn set_skip_worktree(&self, file_path: &str, skip: bool) -> Result<(), RepoError> {
        let relative = self.relative_path(file_path)?;
        let mut index = self.repo.index().map_err(RepoError::IndexError)?;

        let position = index
            .iter()
            .position(|entry| Path::new(std::str::from_utf8(&entry.path).unwrap_or_default()) == relative)
            .ok_or_else(|| RepoError::IndexError(git2::Error::from_str("path is not tracked")))?;

        let mut entry = index.get(position).ok_or_else(|| {
            RepoError::IndexError(git2::Error::from_str("index entry vanished while updating"))
        })?;

        const SKIP_WORKTREE_FLAG: u16 = 0x4000;
        if skip {
            entry.flags_extended |= SKIP_WORKTREE_FLAG;
        } else {
            entry.flags_extended &= !SKIP_WORKTREE_FLAG;
        }

        index.add(&entry).map_err(RepoError::IndexError)?;
        index.write().map_err(RepoError::WriteIndexError)?;
        Ok(())
    }

    /// Returns `true` if `file_path` currently differs from the index or has
    /// `skip-worktree` set, i.e. the same scope `git status` consults.
    ///
    /// # Errors
    /// Returns [`RepoError::StatusError`] if the repository status cannot be computed.
    pub fn has_skip_worktree(&self, file_path: &str) -> Result<bool, RepoError> {
        let relative = self.relative_path(file_path)?;
        let index = self.repo.index().map_err(RepoError::IndexError)?;
        let Some(position) = index
            .iter()
            .position(|entry| Path::new(std::str::from_utf8(&entry.path).unwrap_or_default()) == relative)
        else {
            return Ok(false);
        };
        let entry = index.get(position).ok_or_else(|| {
            RepoError::IndexError(git2::Error::from_str("index entry vanished while reading"))
        })?;
        const SKIP_WORKTREE_FLAG: u16 = 0x4000;
        Ok(entry.flags_extended & SKIP_WORKTREE_FLAG != 0)
    }

    /// Stages `file_path` (equivalent to `git add <path>`). Used to bring a
    /// freshly-written `.npmrc` marker block under version control before
    /// `skip-worktree` can be applied to it.
    ///
    /// # Errors
    /// Returns [`RepoError::IndexError`] if the path cannot be added, or
    /// [`RepoError::WriteIndexError`] if the index cannot be written.
    pub fn add(&self, file_path: &str) -> Result<(), RepoError> {
        let relative = self.relative_path(file_path)?;
        let mut index = self.repo.index().map_err(RepoError::IndexError)?;
        index
            .add_all([relative], IndexAddOption::DEFAULT, None)
            .map_err(RepoError::IndexError)?;
        index.write().map_err(RepoError::WriteIndexError)?;
        Ok(())
    }

    /// Detects which pre-commit hook mechanism a repository uses, in the
    /// priority order `.husky/pre-commit` → lefthook config → raw
    /// `.git/hooks/pre-commit`.
    ///
    /// Returns `None` only if none of the three locations exist and no
    /// `.git/hooks` directory could be found at all (e.g. a bare repository).
    #[must_use]
    pub fn detect_hook_kind(&self) -> Option<HookKind> {
        if self.local_path.join(".husky").join("pre-commit").is_file() {
            return Some(HookKind::Husky);
        }
        for candidate in ["lefthook.yml", "lefthook.yaml", ".lefthook.yml", ".lefthook.yaml"] {
            if self.local_path.join(candidate).is_file() {
                return Some(HookKind::Lefthook);
            }
        }
        self.repo.path().join("hooks").is_dir().then_some(HookKind::Raw)
    }

    /// Path to the raw git hooks directory (`.git/hooks`), for callers that
    /// detected [`HookKind::Raw`] and need to write `pre-commit` directly.
    #[must_use]
    pub fn hooks_dir(&self) -> PathBuf {
        self.repo.path().join("hooks")
    }

    /// Returns every path with uncommitted modifications, the way
    /// `git status --porcelain` would list them, ignoring untracked files.
    ///
    /// # Errors
    /// Returns [`RepoError::StatusError`] if the repository status cannot be computed.
    pub fn modified_paths(&self) -> Result<Vec<String>, RepoError> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options)).map_err(RepoError::StatusError)?;
        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .filter_map(|entry| entry.path().map(String::from))
            .collect())
    }
}
