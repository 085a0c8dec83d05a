//! # sublime_git_tools
//!
//! A narrow Rust interface to the Git operations pkglab's consumer sync
//! engine needs, built on libgit2.
//!
//! ## Overview
//!
//! `sublime_git_tools` wraps `git2` to offer exactly the operations the
//! `.npmrc` marker-block and pre-commit hook injection flows need: opening a
//! repository, checking whether a path is tracked, toggling the
//! `skip-worktree` index flag, and detecting which pre-commit hook mechanism
//! (husky, lefthook, or raw git hooks) a repository uses.
//!
//! ## Main Features
//!
//! ### Skip-worktree toggling
//!
//! ```no_run
//! use sublime_git_tools::Repo;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Repo::open("./my-project")?;
//!
//! if repo.is_tracked(".npmrc")? {
//!     repo.set_skip_worktree(".npmrc", true)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Hook detection
//!
//! ```no_run
//! use sublime_git_tools::{HookKind, Repo};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Repo::open("./my-project")?;
//!
//! match repo.detect_hook_kind() {
//!     Some(HookKind::Husky) => println!(".husky/pre-commit found"),
//!     Some(HookKind::Lefthook) => println!("lefthook config found"),
//!     Some(HookKind::Raw) => println!(".git/hooks/pre-commit is the target"),
//!     None => println!("no hooks directory found"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]

mod repo;
mod types;

#[cfg(test)]
mod tests;

pub use types::{HookKind, Repo, RepoError};
