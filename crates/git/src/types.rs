use git2::{Error as Git2Error, Repository};
use std::{path::PathBuf, sync::Arc};
use thiserror::Error;

/// Represents a Git repository with high-level operation methods
///
/// This struct wraps the libgit2 `Repository` type and provides simplified methods
/// for the narrow set of Git operations pkglab's consumer sync engine needs:
/// checking whether a path is tracked, and toggling the `skip-worktree` index
/// flag on it.
#[derive(Clone)]
pub struct Repo {
    #[allow(clippy::arc_with_non_send_sync)]
    pub(crate) repo: Arc<Repository>,
    pub(crate) local_path: PathBuf,
}

/// Which pre-commit hook mechanism a repository uses, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// `.husky/pre-commit` exists.
    Husky,
    /// A `lefthook.yml`/`lefthook.yaml`/`.lefthook.yml` config file exists.
    Lefthook,
    /// A raw `.git/hooks/pre-commit` script exists (or none of the above do,
    /// and raw git hooks are the fallback target).
    Raw,
}

/// Errors that can occur when working with Git repositories
#[derive(Error, Debug)]
pub enum RepoError {
    /// Failed to canonicalize a path
    #[error("Failed to canonicalize path: {0}")]
    CanonicalPathFailure(#[source] std::io::Error),

    /// Generic Git operation failure
    #[error("Failed to execute git: {0}")]
    GitFailure(#[source] Git2Error),

    /// Failed to open an existing repository
    #[error("Failed to open repository: {0}")]
    OpenRepoFailure(#[source] Git2Error),

    /// Failed to get or manipulate the index
    #[error("Failed to map index: {0}")]
    IndexError(#[source] Git2Error),

    /// Failed to write the index
    #[error("Failed to write index: {0}")]
    WriteIndexError(#[source] Git2Error),

    /// Failed to get repository status
    #[error("Failed to get status: {0}")]
    StatusError(#[source] Git2Error),

    /// The path is not inside the repository's working directory.
    #[error("Path is not inside the repository working directory: {0}")]
    PathOutsideWorkdir(PathBuf),

    /// No pre-commit hook mechanism could be found or created for the repository.
    #[error("Failed to detect or create a hooks directory: {0}")]
    HooksDirError(#[source] std::io::Error),
}

impl From<Git2Error> for RepoError {
    fn from(err: Git2Error) -> Self {
        RepoError::GitFailure(err)
    }
}

#[allow(clippy::too_many_lines)]
impl Clone for RepoError {
    fn clone(&self) -> Self {
        match self {
            RepoError::CanonicalPathFailure(_) => {
                let io_err = std::io::Error::other(format!("{self}"));
                RepoError::CanonicalPathFailure(io_err)
            }
            RepoError::GitFailure(_) => RepoError::GitFailure(Git2Error::from_str(&format!("{self}"))),
            RepoError::OpenRepoFailure(_) => {
                RepoError::OpenRepoFailure(Git2Error::from_str(&format!("{self}")))
            }
            RepoError::IndexError(_) => RepoError::IndexError(Git2Error::from_str(&format!("{self}"))),
            RepoError::WriteIndexError(_) => {
                RepoError::WriteIndexError(Git2Error::from_str(&format!("{self}")))
            }
            RepoError::StatusError(_) => RepoError::StatusError(Git2Error::from_str(&format!("{self}"))),
            RepoError::PathOutsideWorkdir(path) => RepoError::PathOutsideWorkdir(path.clone()),
            RepoError::HooksDirError(_) => {
                RepoError::HooksDirError(std::io::Error::other(format!("{self}")))
            }
        }
    }
}
