//! # `sublime_fingerprint_tools`
//!
//! Content fingerprinting for pkglab's publish pipeline: deciding, cheaply
//! and correctly, whether a workspace package's publishable bytes changed
//! since the last time it was hashed.
//!
//! ## What
//! - [`mod@selector`]: reproduces npm's file-selection rules (`files[]`,
//!   always-included docs, entry points, the `bundledDependencies` →
//!   `pack --dry-run` fallback) so the hash covers exactly what would ship.
//! - [`mod@hash`]: SHA-256 over the selected files in sorted-path order,
//!   with a mtime/size fast path that skips re-reading unchanged files.
//! - [`mod@state`]: the persisted `{workspaceRoot, packageName, tag} ->
//!   record` map that makes the fast path possible across CLI invocations.
//!
//! ## Why
//! Re-publishing unchanged packages wastes registry revisions and churns
//! consumer lockfiles for no reason. Fingerprinting lets the publish
//! pipeline skip a package outright when nothing it would ship has moved.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod error;
pub mod hash;
pub mod selector;
pub mod state;

pub use error::{FingerprintError, FingerprintResult};
pub use hash::{fingerprint, FileStat, Fingerprint, FINGERPRINT_FORMAT_VERSION};
pub use selector::{ignore_file_contents, select_publish_files};
pub use state::{FingerprintKey, FingerprintRecord, FingerprintState, UNTAGGED};
