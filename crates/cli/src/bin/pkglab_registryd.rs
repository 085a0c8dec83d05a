//! `pkglab-registryd`: the registry daemon binary `pub up` spawns.
//!
//! # What
//! Loads storage from `<home>/storage`, builds the axum router from
//! `sublime_registry`, binds the requested port, prints the `READY` line
//! `sublime_standard_tools::process::spawn_and_wait_ready` waits on, then
//! redirects its own stdout/stderr to `<home>/daemon.log` before serving.
//!
//! # Why
//! Kept as a separate binary (rather than a `--daemonize` flag on `pub`
//! itself) so `pub up` can spawn it as a detached child and the process
//! table cleanly distinguishes "a publish is running" from "the registry is
//! listening".

#![warn(missing_docs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::panic)]
// The READY-line handshake is a print-to-stdout protocol by design; see
// `sublime_standard_tools::process::spawn_and_wait_ready`.
#![allow(clippy::print_stdout)]

use std::io::Write;
use std::sync::Arc;

use sublime_publish_tools::PublishQueue;
use sublime_registry::{AppState, Storage};
use sublime_standard_tools::paths::PkglabPaths;

const READY_LINE: &str = "READY";
const DEFAULT_UPSTREAM: &str = "https://registry.npmjs.org";
const UPSTREAM_ENV_VAR: &str = "PKGLAB_UPSTREAM_REGISTRY";
const NO_UPSTREAM_ENV_VAR: &str = "PKGLAB_NO_UPSTREAM";

fn parse_port() -> u16 {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--port" {
            if let Some(value) = args.next() {
                if let Ok(port) = value.parse() {
                    return port;
                }
            }
        }
    }
    4873
}

fn upstream_url() -> Option<String> {
    if std::env::var_os(NO_UPSTREAM_ENV_VAR).is_some() {
        return None;
    }
    Some(std::env::var(UPSTREAM_ENV_VAR).unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string()))
}

fn main() {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(serve()) {
        eprintln!("pkglab-registryd: {e}");
        std::process::exit(1);
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let paths = PkglabPaths::discover()?;
    paths.ensure_dirs()?;

    let port = parse_port();
    let storage = Storage::load_all(paths.storage_dir()).await?;
    let state = AppState {
        storage: Arc::new(storage),
        http_client: reqwest::Client::new(),
        registry_base_url: format!("http://127.0.0.1:{port}"),
        upstream_url: upstream_url(),
        queue: Arc::new(PublishQueue::new()),
    };

    let router = sublime_registry::build_router(state);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;

    // Print READY on the inherited stdout pipe before reopening our own
    // streams to the daemon log; `spawn_and_wait_ready`'s reader thread
    // stops consuming the pipe the instant it sees this line.
    println!("{READY_LINE}");
    std::io::stdout().flush()?;
    redirect_to_log_file(&paths.daemon_log_file())?;

    env_logger::init();
    log::info!("pkglab-registryd listening on 127.0.0.1:{port}");

    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(unix)]
fn redirect_to_log_file(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::fd::AsRawFd;

    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    let fd = file.as_raw_fd();
    // SAFETY: `fd` is a valid, open file descriptor for the file just
    // opened above; 1 and 2 are always-valid standard stream slots. The
    // file is leaked deliberately so the redirected descriptors stay open
    // for the daemon's lifetime.
    unsafe {
        libc::dup2(fd, 1);
        libc::dup2(fd, 2);
    }
    std::mem::forget(file);
    Ok(())
}

#[cfg(not(unix))]
fn redirect_to_log_file(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}
