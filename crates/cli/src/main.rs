//! Entry point for the `pub` binary.
//!
//! # What
//! Parses arguments, dispatches to the matching command module, and turns
//! any [`CliError`] into the right process exit code (§6/§7 of the
//! component design).
//!
//! # Why
//! Kept minimal on purpose: `sublime_publish_tools::queue`'s drain loop
//! shells out to this exact binary, so its startup cost and argument
//! handling are on the hot path of every coalesced publish.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]
#![allow(clippy::exit)]

use std::process;

use clap::Parser;
use sublime_cli_tools::args::{Cli, Command};
use sublime_cli_tools::commands;
use sublime_cli_tools::context::CliContext;
use sublime_cli_tools::error::CliResult;
use sublime_cli_tools::output::OutputManager;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let out = OutputManager::new(!cli.no_color && std::env::var_os("NO_COLOR").is_none());

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start async runtime: {e}");
            process::exit(1);
        }
    };

    let result = runtime.block_on(dispatch(cli, &out));

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            out.error(&e.to_string());
            process::exit(e.exit_code());
        }
    }
}

async fn dispatch(cli: Cli, out: &OutputManager) -> CliResult<()> {
    match cli.command {
        None => {
            let ctx = CliContext::load()?;
            commands::publish::run(&ctx, out, &cli.publish).await
        }
        Some(Command::Pub { args }) => {
            let ctx = CliContext::load()?;
            commands::publish::run(&ctx, out, &args).await
        }
        Some(Command::Up { port }) => commands::up::run(out, port).await,
        Some(Command::Down) => {
            let ctx = CliContext::load()?;
            commands::down::run(&ctx, out)
        }
        Some(Command::Status) => {
            let ctx = CliContext::load()?;
            commands::status::run(&ctx, out).await
        }
        Some(Command::Logs { lines }) => {
            let ctx = CliContext::load()?;
            commands::logs::run(&ctx, out, lines)
        }
        Some(Command::Add { names, tag, hook_check_command }) => {
            let ctx = CliContext::load()?;
            commands::add::run(&ctx, out, &names, tag.as_deref(), hook_check_command.as_deref()).await
        }
        Some(Command::Restore { names, all }) => {
            let ctx = CliContext::load()?;
            commands::restore::run(&ctx, out, &names, all)
        }
        Some(Command::Repo { action }) => {
            let ctx = CliContext::load()?;
            commands::repo::run(&ctx, out, action)
        }
        Some(Command::Pkg { action }) => {
            let ctx = CliContext::load()?;
            commands::pkg::run(&ctx, out, action).await
        }
        Some(Command::Prune) => {
            let ctx = CliContext::load()?;
            commands::prune::run(&ctx, out).await
        }
        Some(Command::Reset { yes }) => {
            let ctx = CliContext::load()?;
            commands::reset::run(&ctx, out, yes)
        }
        Some(Command::Doctor) => {
            let ctx = CliContext::load()?;
            commands::doctor::run(&ctx, out).await
        }
        Some(Command::Check) => commands::check::run(out),
        Some(Command::Hooks { action }) => commands::hooks::run(out, action),
    }
}
