//! # `sublime_standard_tools`
//!
//! A foundational toolkit shared by every pkglab crate: process and command
//! execution, async filesystem access, layered configuration, and the error
//! types the rest of the workspace converts into.
//!
//! ## What
//! This crate owns the concerns that have nothing to do with registries or
//! dependency graphs but that every crate above it still needs: running
//! subprocesses, reading and writing files without blocking the executor,
//! loading configuration from files/env/defaults with clear precedence, and
//! detecting which Node.js package manager a given directory uses.
//!
//! ## How
//! The crate follows a clean architectural approach with clear separation of concerns:
//!
//! ### Core Modules
//! - **`node`**: Generic Node.js concepts (package manager detection)
//! - **`command`**: Robust command execution framework, including a bounded queue
//! - **`filesystem`**: Safe, async filesystem operations and path utilities
//! - **`config`**: Layered configuration (file, environment, defaults)
//! - **`error`**: Comprehensive error handling
//!
//! ### Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    sublime_standard_tools                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  node/        │  Generic Node.js concepts                  │
//! │  └─package_*  │  └─ PackageManager & PackageManagerKind    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  command/     │  Robust command execution + work queue     │
//! │  filesystem/  │  Async filesystem operations               │
//! │  config/      │  Layered configuration management          │
//! │  error/       │  Comprehensive error handling               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why
//! Every daemon, CLI command and sync operation in pkglab eventually shells
//! out, touches the filesystem, or reads configuration. Centralizing these
//! concerns here keeps the registry, publish and sync crates focused on their
//! own domain logic instead of re-implementing process plumbing four times.
//!
//! ## Quick Start
//!
//! ### Work with package managers
//! ```rust
//! use sublime_standard_tools::node::PackageManager;
//! use std::path::Path;
//!
//! // Detect package manager
//! let manager = PackageManager::detect(Path::new("."))?;
//! println!("Using {}", manager.command());
//!
//! // Check capabilities
//! if manager.supports_workspaces() {
//!     println!("Workspaces supported");
//! }
//! # Ok::<(), sublime_standard_tools::error::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod command;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod node;
pub mod paths;
pub mod process;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the crate
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
