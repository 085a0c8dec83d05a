//! # `sublime_registry`
//!
//! The local npm-compatible registry: a crash-safe packument/tarball store
//! plus the axum HTTP router that exposes it to `npm`/`pnpm`/`bun` clients
//! and to pkglab's own CLI.
//!
//! ## What
//! [`mod@storage`] owns everything under the storage root: an in-memory
//! packument index, per-package locks, and three small caches (full-JSON,
//! merged-upstream, pkglab-filtered index). [`mod@router`]
//! wires axum routes onto the handler functions in [`mod@handlers`], which
//! stay free of extractor plumbing so they can be exercised directly in
//! tests. [`mod@upstream`] proxies and merges packuments/tarballs pkglab
//! never published itself. [`mod@queue_handle`] defines the trait the
//! router depends on to reach the publish queue, which lives in
//! `sublime_publish_tools` to avoid a crate cycle.
//!
//! ## Why
//! A monorepo consumer needs a registry that behaves exactly like npm's own
//! wire protocol — no custom client, no special-cased resolver — so that
//! `npm install`/`pnpm install`/`bun install` just work against locally
//! published versions. Keeping storage, routing and upstream proxying as
//! separate modules lets each be unit-tested without spinning up a real
//! HTTP server.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod error;
pub mod handlers;
pub mod index;
pub mod naming;
pub mod packument;
pub mod queue_handle;
pub mod router;
pub mod state;
pub mod storage;
pub mod upstream;

pub use error::{RegistryError, RegistryResult};
pub use packument::{Attachment, Dist, Packument, VersionMeta};
pub use queue_handle::{
    EnqueueOutcome, EnqueueStatus, LaneStatus, PublishQueueHandle, PublishRequest, WorkspaceQueueStatus,
};
pub use router::build_router;
pub use state::AppState;
pub use storage::Storage;
