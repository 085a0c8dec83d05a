//! # Version error types
//!
//! ## What
//! Error types for marker-version synthesis and parsing.
//!
//! ## Why
//! Callers need to distinguish a malformed tag (user input) from a version
//! string that simply isn't one of pkglab's own marker versions, since the
//! latter is an expected, non-exceptional outcome for the parsers.

use thiserror::Error;

/// Result type for version codec operations.
pub type VersionResult<T> = Result<T, VersionError>;

/// Errors produced while synthesizing or parsing marker versions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The tag sanitizer reduced the input to nothing.
    #[error("tag '{raw}' sanitizes to an empty string")]
    EmptyTag {
        /// The original, unsanitized tag.
        raw: String,
    },

    /// A synthesized version failed to parse as valid semver, which would
    /// indicate a bug in [`crate::codec::synthesize`] rather than bad input.
    #[error("synthesized version '{version}' is not valid semver: {source}")]
    ParseFailed {
        /// The version string that failed to parse.
        version: String,
        /// The underlying semver parse error.
        #[source]
        source: semver::Error,
    },
}
