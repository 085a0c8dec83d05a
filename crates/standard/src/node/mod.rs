//! # Node.js package manager abstractions
//!
//! ## What
//! Generic, reusable Node.js package manager concepts: which tools exist,
//! their lock files, their install/publish command shapes, and how to
//! detect which one a directory uses.
//!
//! ## How
//! `PackageManagerKind` models the family; `PackageManager` wraps a detected
//! instance bound to a working directory. Detection walks the directory for
//! the package manager's lock file, falling back to `packageManager` in
//! `package.json` (Corepack's field) when no lock file is present yet.
//!
//! ## Why
//! Every consumer-sync and publish operation eventually shells out to one of
//! these tools; centralizing the mapping from lock file to command avoids
//! four copies of the same `match` scattered through the sync engine.

mod package_manager;
mod types;

pub use package_manager::{PackageManager, PackageManagerKind};
pub use types::RepoKind;
