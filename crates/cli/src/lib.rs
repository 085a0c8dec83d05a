//! # `sublime_cli_tools`
//!
//! The `pub` binary and its consumer-repo/registry-daemon commands.
//!
//! ## What
//! [`args`] defines the command-line surface; [`context`] resolves the
//! pkglab home layout, config and HTTP client every command shares;
//! [`commands`] holds one module per subcommand, each driving the engine
//! crates (`sublime_graph_tools`, `sublime_fingerprint_tools`,
//! `sublime_publish_tools`, `sublime_sync_tools`, `sublime_hooks_tools`,
//! `sublime_git_tools`) directly rather than re-implementing their logic.
//!
//! ## Why
//! `pub` is the only thing that actually runs the publish pipeline —
//! `sublime_publish_tools::queue::PublishQueue` (hosted by the registry
//! daemon) shells back out to this same binary to do it, rather than
//! re-running the pipeline in-process. Bare invocation (no subcommand)
//! performs a publish for exactly that reason.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

pub mod args;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;
