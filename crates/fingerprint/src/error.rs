//! Error types for file selection and content fingerprinting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for this crate.
pub type FingerprintResult<T> = Result<T, FingerprintError>;

/// Errors produced while selecting publish files or computing a fingerprint.
#[derive(Error, Debug, Clone)]
pub enum FingerprintError {
    /// A filesystem operation failed.
    #[error("I/O failure on {path}: {message}")]
    Io {
        /// Path the failing operation targeted.
        path: PathBuf,
        /// Underlying error detail.
        message: String,
    },

    /// A `files[]` glob pattern in `package.json` was malformed.
    #[error("invalid files[] pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Glob parser detail.
        message: String,
    },

    /// The package manager's `pack --dry-run` fallback (used for
    /// `bundledDependencies` packages) failed or produced unparsable output.
    #[error("pack --dry-run fallback failed for {package}: {message}")]
    PackDryRunFailed {
        /// The package the fallback was attempted for.
        package: String,
        /// Failure detail.
        message: String,
    },
}
