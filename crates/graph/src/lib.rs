//! # `sublime_graph_tools`
//!
//! Workspace discovery, dependency-graph construction and cascade planning
//! for pkglab's publish pipeline.
//!
//! ## What
//! - [`mod@discovery`]: finds a workspace root and expands its member
//!   patterns into concrete packages (npm/yarn/bun `workspaces` field or
//!   pnpm's `pnpm-workspace.yaml`).
//! - [`mod@manifest`]: a typed, round-trip-safe `package.json` view.
//! - [`mod@graph`]: adjacency lists over workspace package names, with
//!   precomputed transitive-dependency and transitive-dependent sets.
//! - [`mod@cascade`]: the three-phase cascade (initial scope, dependent
//!   expansion, dependency closure) and the deterministic topological sort
//!   that turns a scope into a publish order.
//!
//! ## Why
//! Publishing one package in a workspace almost never means publishing only
//! that package: its dependents need the new version, and its own workspace
//! deps need to exist first. This crate is where that reasoning lives,
//! independent of how the resulting plan gets executed.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod cascade;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod manifest;

pub use cascade::{cascade as compute_cascade, topo_sort, CascadeInput, CascadePlan, SkippedDependent};
pub use discovery::{discover, find_root, Workspace, WorkspacePackage};
pub use error::{GraphError, GraphResult};
pub use graph::DependencyGraph;
pub use manifest::{Dependencies, PackageManifest, PublishConfig, WorkspaceConfig};
