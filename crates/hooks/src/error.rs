//! Error types for hook execution and hook-script injection.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running or injecting hooks.
#[derive(Error, Debug, Clone)]
pub enum HookError {
    /// The hook process did not finish before its timeout and was killed.
    #[error("hook '{name}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Name of the hook (e.g. `pre-commit`, `post-publish`).
        name: String,
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The hook exited with a non-zero status.
    #[error("hook '{name}' exited with status {code}: {stderr_head}")]
    NonZeroExit {
        /// Name of the hook.
        name: String,
        /// Exit status code.
        code: i32,
        /// First lines of the hook's stderr, for user-visible diagnostics.
        stderr_head: String,
    },

    /// The hook process could not be spawned.
    #[error("failed to spawn hook '{name}': {message}")]
    SpawnFailed {
        /// Name of the hook.
        name: String,
        /// The underlying I/O failure message.
        message: String,
    },

    /// An unrelated marker-block already occupies the target hook file, or
    /// the hook file's content could not be parsed as a shell script.
    #[error("hook file already contains a conflicting marker block: {path}")]
    MarkerConflict {
        /// Path to the conflicting hook file.
        path: PathBuf,
    },

    /// Lefthook is config-only; pkglab does not edit its YAML on the user's behalf.
    #[error(
        "lefthook detected at {config_path}; add the check command to its pre-commit section manually"
    )]
    LefthookUnsupported {
        /// Path to the detected lefthook configuration file.
        config_path: PathBuf,
    },

    /// No pre-commit hook mechanism could be found and none could be created.
    #[error("no hooks directory found under {repo_root}")]
    NoHooksDirectory {
        /// Root of the repository that was searched.
        repo_root: PathBuf,
    },

    /// Filesystem I/O failure while reading or writing a hook script.
    #[error("I/O failure on hook file {path}: {message}")]
    Io {
        /// Path that the I/O operation was acting on.
        path: PathBuf,
        /// The underlying I/O failure message.
        message: String,
    },
}

/// Result type for hook operations.
pub type HookResult<T> = Result<T, HookError>;
