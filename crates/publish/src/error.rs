//! Error types for publish plan construction, tarball packing and upload.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for this crate.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors produced while planning, packing or executing a publish.
#[derive(Error, Debug, Clone)]
pub enum PublishError {
    /// Cascade planning failed.
    #[error("cascade planning failed: {0}")]
    Cascade(String),

    /// Fingerprinting a workspace package failed.
    #[error("fingerprinting {package} failed: {message}")]
    Fingerprint {
        /// Package the fingerprint was being computed for.
        package: String,
        /// Underlying failure detail.
        message: String,
    },

    /// Marker version synthesis failed.
    #[error("version synthesis failed: {0}")]
    Version(String),

    /// A filesystem operation during staging or packing failed.
    #[error("I/O failure on {path}: {message}")]
    Io {
        /// Path the failing operation targeted.
        path: PathBuf,
        /// Underlying error detail.
        message: String,
    },

    /// Packing a tarball failed.
    #[error("failed to pack tarball for {package}: {message}")]
    Pack {
        /// Package the tarball was being built for.
        package: String,
        /// Underlying failure detail.
        message: String,
    },

    /// The registry rejected a publish request.
    #[error("registry rejected publish of {package}@{version}: {message}")]
    RegistryRejected {
        /// Package name.
        package: String,
        /// Version that was rejected.
        version: String,
        /// Registry-provided detail.
        message: String,
    },

    /// The registry could not be reached at all.
    #[error("registry unreachable: {0}")]
    RegistryUnreachable(String),

    /// Rolling back already-published entries after a failed publish also
    /// failed; the registry may be left holding a partial plan.
    #[error("rollback failed for {package}@{version}: {message}")]
    RollbackFailed {
        /// Package that could not be rolled back.
        package: String,
        /// Version that could not be unpublished.
        version: String,
        /// Underlying failure detail.
        message: String,
    },

    /// Spawning the `pub` worker subprocess failed.
    #[error("failed to spawn publish worker: {0}")]
    WorkerSpawn(String),
}
