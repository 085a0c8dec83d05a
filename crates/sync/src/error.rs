//! Error types for consumer-repo sync, repo state and pruning.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while syncing a consumer repository.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// Filesystem I/O failure.
    #[error("I/O failure on {path}: {message}")]
    Io {
        /// Path the failing operation acted on.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// A repo-state sidecar file exists but could not be parsed as JSON.
    #[error("repo state at {path} could not be parsed: {message}")]
    RepoStateCorrupt {
        /// Path to the malformed sidecar.
        path: PathBuf,
        /// Underlying parse error message.
        message: String,
    },

    /// A manifest could not be read or parsed.
    #[error("manifest at {path} could not be read: {message}")]
    ManifestError {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// `.npmrc` already carries a non-loopback `registry=` line pkglab did
    /// not write.
    #[error("{path} already sets a non-loopback registry ({existing}); refusing to overwrite")]
    NpmrcConflict {
        /// Path to the conflicting `.npmrc`.
        path: PathBuf,
        /// The existing, non-loopback registry line.
        existing: String,
    },

    /// A pnpm lockfile could not be patched in place; the caller should
    /// fall back to a full (non-frozen) install.
    #[error("could not patch pnpm lockfile at {path}: {message}")]
    LockfilePatchFailed {
        /// Path to the lockfile.
        path: PathBuf,
        /// Reason the patch could not be applied.
        message: String,
    },

    /// The package manager's install command failed after every fallback
    /// this engine knows about.
    #[error("install failed for {repo}: {message}")]
    InstallFailed {
        /// Repo the install ran in.
        repo: PathBuf,
        /// First lines of the failing command's stderr.
        message: String,
    },

    /// Sync failed and the write phase was rolled back.
    #[error("sync failed for {repo} and was rolled back: {message}")]
    RolledBack {
        /// Repo the sync targeted.
        repo: PathBuf,
        /// The failure that triggered rollback.
        message: String,
    },

    /// The registry rejected or could not serve a request the pruner or
    /// sync engine depends on.
    #[error("registry request failed: {0}")]
    Registry(String),

    /// A lower-layer git operation failed.
    #[error(transparent)]
    Git(#[from] sublime_git_tools::RepoError),

    /// Pre-commit hook injection or removal failed.
    #[error(transparent)]
    Hook(#[from] sublime_hooks_tools::HookError),
}

/// Result type for sync/repo-state/pruner operations.
pub type SyncResult<T> = Result<T, SyncError>;
