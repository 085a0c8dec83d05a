//! CLI-specific error types, exit codes and user-facing messages.
//!
//! Every engine-crate error funnels through [`CliError`] so `main` has one
//! place to decide the process exit code (§6 of the component design: `0`
//! success, `1` user-visible failure, `2` configuration mismatch requiring
//! `pkglab reset`).

use thiserror::Error;

/// CLI-specific result type.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the user by `pub` and the consumer-repo commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// The home directory's `config.json` predates the current schema.
    #[error("{0}\nrun `pub reset` to start over with a fresh config")]
    ConfigIncompatible(String),

    /// A command that needs the daemon found none running.
    #[error("the pkglab registry isn't running; run `pub up` first")]
    DaemonNotRunning,

    /// `up` was run while a daemon is already recorded as running.
    #[error("the pkglab registry is already running (pid {0})")]
    DaemonAlreadyRunning(u32),

    /// Another `pub` invocation already holds the publish lock.
    #[error("another publish is already in progress (lock file at {0}); remove it if the previous run crashed")]
    LockHeld(String),

    /// No workspace root could be found above the current directory.
    #[error("no workspace found above {0}: expected a package.json with a \"workspaces\" field or a pnpm-workspace.yaml")]
    NoWorkspace(String),

    /// Wraps [`sublime_graph_tools::GraphError`], most notably `CycleDetected`.
    #[error(transparent)]
    Graph(#[from] sublime_graph_tools::GraphError),

    /// Wraps [`sublime_fingerprint_tools::FingerprintError`].
    #[error(transparent)]
    Fingerprint(#[from] sublime_fingerprint_tools::FingerprintError),

    /// Wraps [`sublime_publish_tools::PublishError`].
    #[error(transparent)]
    Publish(#[from] sublime_publish_tools::PublishError),

    /// Wraps [`sublime_sync_tools::SyncError`].
    #[error(transparent)]
    Sync(#[from] sublime_sync_tools::SyncError),

    /// Wraps [`sublime_hooks_tools::HookError`].
    #[error(transparent)]
    Hook(#[from] sublime_hooks_tools::HookError),

    /// Wraps [`sublime_git_tools::RepoError`].
    #[error(transparent)]
    Git(#[from] sublime_git_tools::RepoError),

    /// Wraps [`sublime_version_tools::VersionError`].
    #[error(transparent)]
    Version(#[from] sublime_version_tools::VersionError),

    /// Wraps `sublime_standard_tools`'s composite error (paths, config, process, command).
    #[error(transparent)]
    Standard(#[from] sublime_standard_tools::error::Error),

    /// A request to the registry could not be completed.
    #[error("registry request failed: {0}")]
    Registry(String),

    /// A request to the registry completed but reported an error status.
    #[error("registry rejected the request: {0}")]
    RegistryRejected(String),

    /// Generic I/O failure not already covered by a more specific variant.
    #[error("{0}")]
    Io(String),

    /// A command-line argument combination doesn't make sense.
    #[error("{0}")]
    InvalidArgs(String),
}

impl CliError {
    /// The process exit code this error should produce.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigIncompatible(_) => 2,
            _ => 1,
        }
    }

    /// Maps a workspace-discovery failure to [`CliError::NoWorkspace`] for the
    /// two "nothing here" cases, passing every other [`sublime_graph_tools::GraphError`]
    /// through as [`CliError::Graph`].
    #[must_use]
    pub fn from_discovery(error: sublime_graph_tools::GraphError, start: &std::path::Path) -> Self {
        match error {
            sublime_graph_tools::GraphError::RootNotFound { .. }
            | sublime_graph_tools::GraphError::NoWorkspacePatterns { .. } => {
                CliError::NoWorkspace(start.display().to_string())
            }
            other => CliError::Graph(other),
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        CliError::Registry(e.to_string())
    }
}
