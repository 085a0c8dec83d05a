//! Error types for workspace discovery, graph construction and cascade.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for this crate.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors produced while discovering a workspace or planning a cascade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No workspace root could be found above the given directory.
    #[error("no workspace root found above {path}")]
    RootNotFound {
        /// The directory discovery started from.
        path: PathBuf,
    },

    /// No workspace member patterns were found in the root manifest.
    #[error("no workspace member patterns declared at {path}")]
    NoWorkspacePatterns {
        /// The root manifest that lacked a `workspaces` field.
        path: PathBuf,
    },

    /// A `package.json` failed to parse.
    #[error("failed to parse package.json: {message}")]
    ManifestParse {
        /// Parse failure detail.
        message: String,
    },

    /// A filesystem operation failed.
    #[error("I/O failure on {path}: {message}")]
    Io {
        /// Path the failing operation targeted.
        path: PathBuf,
        /// Underlying error detail.
        message: String,
    },

    /// Two workspace packages declared the same name.
    #[error("duplicate workspace package name '{name}' at {first} and {second}")]
    DuplicatePackageName {
        /// The name declared twice.
        name: String,
        /// Directory of the first package seen with this name.
        first: PathBuf,
        /// Directory of the second package seen with this name.
        second: PathBuf,
    },

    /// Cascade planning could not produce a full ordering: the scope
    /// contains a dependency cycle.
    #[error("dependency cycle detected: {}", path.join(" -> "))]
    CycleDetected {
        /// The shortest cycle found, as package names in order.
        path: Vec<String>,
    },
}
