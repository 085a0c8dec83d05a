//! # `sublime_sync_tools`
//!
//! Consumer-repo state, manifest/catalog rewriting, lockfile patching,
//! package-manager installs, `.npmrc` management and retention pruning for
//! pkglab's consumer-sync engine.
//!
//! ## What
//! - [`mod@repo_state`]: per-repo JSON sidecars recording which packages are
//!   linked into a consumer repo, at which version, and through which
//!   manifest or catalog entries.
//! - [`mod@rewrite`]: discovers and rewrites the places a consumer repo pins
//!   a dependency — plain manifest ranges or pnpm catalog entries — with a
//!   matching restore path for rollback.
//! - [`mod@lockfile`]: in-place `pnpm-lock.yaml` version patching so a
//!   frozen-lockfile install can pick up a synthetic version without a full
//!   re-resolve.
//! - [`mod@install`]: package-manager-specific install invocation, with the
//!   `--ignore-scripts` retry fallback and pnpm/bun fast paths.
//! - [`mod@npmrc`]: marked-block `.npmrc` `registry=` injection, mirroring
//!   `sublime_hooks_tools`'s marker-block idiom.
//! - [`mod@sync`]: the engine that ties the above into one atomic per-repo
//!   sync — write phase, install phase, rollback on failure.
//! - [`mod@pruner`]: per-package, per-tag retention pruning against the
//!   registry's pkglab-filtered index.
//!
//! ## Why
//! A consumer repo's sync has to be all-or-nothing: a failed install after a
//! manifest rewrite leaves a repo in a worse state than before `pub` was
//! ever run. Splitting discovery/write/install/rollback into their own
//! modules keeps that invariant checkable at each seam instead of buried in
//! one function.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod error;
pub mod install;
pub mod lockfile;
pub mod npmrc;
pub mod pruner;
pub mod repo_state;
pub mod rewrite;
pub mod sync;

pub use error::{SyncError, SyncResult};
pub use install::{run_install, InstallOutcome};
pub use lockfile::{patch_file, VersionPatch};
pub use pruner::{plan_prune, prune, PruneReport, PrunedVersion};
pub use repo_state::{CatalogFormat, Link, LinkTarget, RepoState};
pub use rewrite::CatalogTarget;
pub use sync::{install_registry_wiring, remove_registry_wiring, sync_repo, SyncOutcome};
