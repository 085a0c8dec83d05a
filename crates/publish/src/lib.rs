//! # `sublime_publish_tools`
//!
//! Publish plan construction, tarball packing, parallel upload and the
//! coalescing publish queue for pkglab's local registry.
//!
//! ## What
//! - [`mod@plan`]: turns a cascade's publish order into a [`plan::PublishPlan`]
//!   — one shared synthetic version, per-entry dependency rewrites, and any
//!   pnpm catalog members that need rewriting downstream.
//! - [`mod@tarball`]: stages a package's publish files into a scratch
//!   directory, rewrites its manifest, and packs the result into a gzipped
//!   tarball with an npm-style `sha512-` integrity string.
//! - [`mod@publisher`]: uploads a plan's tarballs to a registry with bounded
//!   concurrency, and unpublishes-of-version every already-published entry
//!   if any upload fails.
//! - [`mod@queue`]: [`queue::PublishQueue`], the per-workspace coalescing
//!   queue that sits in front of the `pub` CLI, implementing
//!   [`sublime_registry::PublishQueueHandle`] for the HTTP layer.
//!
//! ## Why
//! These four concerns are what turns "I changed a package" into "every
//! dependent workspace package got a synthetic prerelease version it can be
//! installed against", without requiring every caller of the registry's
//! publish endpoint to re-derive cascade, staging or rollback logic itself.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod error;
pub mod plan;
pub mod publisher;
pub mod queue;
pub mod tarball;

pub use error::{PublishError, PublishResult};
pub use plan::{build_plan, PublishEntry, PublishPlan};
pub use publisher::{execute_plan, unpublish_version, ExecutionOutcome, PublishedEntry};
pub use queue::PublishQueue;
pub use tarball::{build_tarball, PackedTarball};
