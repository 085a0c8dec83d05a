//! # `sublime_hooks_tools`
//!
//! Timeout-bound execution of pre-commit and post-publish hooks, and
//! injection of pkglab's marked check-command block into the hook mechanism
//! a consumer repository already uses.
//!
//! ## What
//! Two independent concerns live here:
//! - [`mod@executor`]: runs a hook command with a configurable timeout, applying
//!   the isolation policy that keeps a hook's failure from masking or
//!   over-escalating the operation it guards.
//! - [`mod@inject`]: writes (and later removes) a marked block into
//!   `.husky/pre-commit` or a raw `.git/hooks/pre-commit` script, or reports
//!   guidance when lefthook is detected (lefthook is config-only; pkglab
//!   does not edit its YAML).
//!
//! ## Why
//! Hook execution must never be allowed to hang a `pub` or sync operation
//! indefinitely, and hook failures have different severities depending on
//! when they run. Centralizing both the timeout/isolation policy and the
//! injection logic keeps that policy in one place instead of re-implemented
//! per call site.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

mod error;
mod executor;
mod inject;

#[cfg(test)]
mod tests;

pub use error::{HookError, HookResult};
pub use executor::{configured_timeout, run_hook, HookOutcome, HookStage};
pub use inject::{install_pre_commit, remove_pre_commit, HookInjectionOutcome};
