//! # `sublime_version_tools`
//!
//! Synthesis and parsing of pkglab's marker prerelease versions —
//! `0.0.0-<marker>[-<tag>].<ts>` — used to identify locally-published
//! versions inside an otherwise ordinary npm registry.
//!
//! ## What
//! [`codec::VersionIssuer`] synthesizes new marker versions with a
//! monotonically increasing timestamp component. The free functions
//! [`codec::is_marker`], [`codec::extract_timestamp`] and
//! [`codec::extract_tag`] parse any string against the grammar, whether or
//! not this process issued it.
//!
//! ## Why
//! The registry, pruner and cascade planner all need to recognize "one of
//! ours" versions and recover their tag/timestamp without re-deriving the
//! grammar at each call site, and the monotonicity guarantee has to survive
//! both rapid consecutive calls and small backward clock jumps.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod codec;
pub mod error;

#[cfg(test)]
mod tests;

pub use codec::{extract_tag, extract_timestamp, is_marker, sanitize_tag, VersionIssuer};
pub use error::{VersionError, VersionResult};

/// The marker pkglab stamps into every synthetic version it issues, absent
/// an operator override. A single local registry should use one marker
/// consistently so the registry index, pruner and consumer sync engine all
/// recognize the same versions as "ours".
pub const DEFAULT_MARKER: &str = "pkglab";
