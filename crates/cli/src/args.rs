//! Command-line surface: the `pub` binary's top-level arguments and
//! subcommands (§6 of the component design).
//!
//! `pub` doubles as its own default subcommand: invoked with no recognized
//! subcommand word, the flattened [`PublishArgs`] drive a publish directly —
//! this is the shape `sublime_publish_tools::queue::build_args` reconstructs
//! when the publish queue's drain loop shells back out to this binary.

use clap::{Args, Parser, Subcommand};

/// pkglab: a local npm-compatible registry and monorepo publish/consumer-sync tool.
#[derive(Debug, Parser)]
#[command(name = "pub", version, about)]
pub struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub publish: PublishArgs,
}

/// A named subcommand. Absent entirely, `pub` runs a publish using
/// `publish` above.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the registry daemon.
    Up {
        /// Port to listen on, overriding `config.json` for this start.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Stop the registry daemon.
    Down,
    /// Show daemon liveness and the publish queue's pending lanes.
    Status,
    /// Tail the daemon's log file.
    Logs {
        /// Number of trailing lines to print.
        #[arg(long, default_value_t = 100)]
        lines: usize,
    },
    /// Publish one or more packages (same as the bare invocation).
    Pub {
        #[command(flatten)]
        args: PublishArgs,
    },
    /// Link packages from the local registry into the current repo.
    Add {
        /// Package names to link; defaults to every publishable package in
        /// the nearest workspace if omitted.
        names: Vec<String>,
        /// Dist-tag to track instead of the latest marker version.
        #[arg(long)]
        tag: Option<String>,
        /// Also install a pre-commit check-command hook for this repo.
        #[arg(long)]
        hook_check_command: Option<String>,
    },
    /// Reverses `add`: restores original version ranges.
    Restore {
        /// Package names to unlink; restores every linked package if omitted.
        names: Vec<String>,
        /// Also remove the `.npmrc` wiring and hooks for this repo.
        #[arg(long)]
        all: bool,
    },
    /// Manage consumer repos known to pkglab.
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },
    /// Inspect or remove packages on the local registry.
    Pkg {
        #[command(subcommand)]
        action: PkgAction,
    },
    /// Unpublish marker versions past the retention window.
    Prune,
    /// Wipe pkglab's home directory (storage, repos, fingerprints, config).
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Check environment prerequisites (node/pnpm/npm, daemon reachability).
    Doctor,
    /// Verify the current workspace is discoverable and cycle-free.
    Check,
    /// Pre-commit hook management.
    Hooks {
        #[command(subcommand)]
        action: HooksAction,
    },
}

/// Flags shared by the bare `pub` invocation and the explicit `pub pub` form,
/// matching the publish-request payload in §6.
#[derive(Debug, Args, Default)]
pub struct PublishArgs {
    /// Packages to publish; the cascade pulls in their workspace deps and
    /// dependents. Ignored when `--root` is set.
    pub targets: Vec<String>,
    /// Publish every publishable package in the workspace.
    #[arg(long)]
    pub root: bool,
    /// Dist-tag to set alongside `latest` for this publish.
    #[arg(long)]
    pub tag: Option<String>,
    /// Republish even if no content change was detected.
    #[arg(long)]
    pub force: bool,
    /// Publish only the explicit targets, skipping cascade expansion.
    #[arg(long)]
    pub single: bool,
    /// Skip the dependent-expansion phase of the cascade (phase 2).
    #[arg(long)]
    pub shallow: bool,
    /// Compute the plan and print it without publishing or syncing.
    #[arg(long)]
    pub dry_run: bool,
}

/// `pub repo <action>`.
#[derive(Debug, Subcommand)]
pub enum RepoAction {
    /// List every known consumer repo.
    Ls,
    /// Mark the current (or given) repo active for fan-out.
    On {
        /// Path to the repo; defaults to the current directory.
        path: Option<String>,
    },
    /// Mark the current (or given) repo inactive.
    Off {
        /// Path to the repo; defaults to the current directory.
        path: Option<String>,
    },
    /// Forget a repo's state sidecar entirely.
    Reset {
        /// Path to the repo; defaults to the current directory.
        path: Option<String>,
    },
    /// Show the display name pkglab derives for a repo (its `package.json`
    /// name, or directory basename if unreadable).
    Rename {
        /// Path to the repo; defaults to the current directory.
        path: Option<String>,
    },
}

/// `pub pkg <action>`.
#[derive(Debug, Subcommand)]
pub enum PkgAction {
    /// List every package and version known to the registry.
    Ls,
    /// Delete a package entirely from the registry.
    Rm {
        /// Package name to remove.
        name: String,
    },
}

/// `pub hooks <action>`.
#[derive(Debug, Subcommand)]
pub enum HooksAction {
    /// Install the marked pre-commit block into the current repo.
    Init {
        /// The command the hook runs.
        #[arg(long, default_value = "pub check")]
        check_command: String,
    },
}
