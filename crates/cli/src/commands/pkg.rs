//! `pub pkg`: inspect or remove packages on the local registry.

use std::collections::BTreeMap;

use serde::Deserialize;
use tabled::Tabled;

use crate::args::PkgAction;
use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// Mirrors `sublime_registry::index`'s private `IndexEntry`, owned for
/// client-side deserialization instead of borrowed for serving.
#[derive(Debug, Deserialize)]
struct IndexEntry {
    rev: String,
    #[serde(rename = "dist-tags", default)]
    dist_tags: BTreeMap<String, String>,
    #[serde(default)]
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IndexDocument {
    packages: BTreeMap<String, IndexEntry>,
}

#[derive(Tabled)]
struct PkgRow {
    name: String,
    latest: String,
    versions: usize,
}

/// Dispatches a `pub pkg` subcommand.
///
/// # Errors
/// Returns [`CliError::RegistryRejected`] if the registry returns an error
/// status, or a wrapped [`reqwest::Error`] on transport failure.
pub async fn run(ctx: &CliContext, out: &OutputManager, action: PkgAction) -> CliResult<()> {
    let url = ctx.registry_url();
    match action {
        PkgAction::Ls => {
            let response = ctx.client.get(format!("{url}/-/pkglab/index")).send().await?;
            if !response.status().is_success() {
                return Err(CliError::RegistryRejected("failed to fetch the package index".to_string()));
            }
            let doc: IndexDocument = response.json().await?;
            let rows = doc
                .packages
                .into_iter()
                .map(|(name, entry)| PkgRow {
                    name,
                    latest: entry.dist_tags.get("latest").cloned().unwrap_or_else(|| "-".to_string()),
                    versions: entry.versions.len(),
                })
                .collect();
            out.table(rows, "no packages published to the local registry yet");
        }
        PkgAction::Rm { name } => {
            let response = ctx.client.get(format!("{url}/{name}")).send().await?;
            if !response.status().is_success() {
                return Err(CliError::RegistryRejected(format!("{name} is not published on the local registry")));
            }
            let packument: sublime_registry::Packument = response.json().await?;
            let delete_url = format!("{url}/{name}/-/rev/{}", packument.rev);
            let delete_response = ctx.client.delete(&delete_url).send().await?;
            if !delete_response.status().is_success() {
                return Err(CliError::RegistryRejected(format!("failed to remove {name}")));
            }
            out.success(&format!("removed {name} from the local registry"));
        }
    }
    Ok(())
}
