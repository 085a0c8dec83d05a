//! Bounded-concurrency upload of a built [`PublishPlan`] against a registry,
//! with unpublish-of-version rollback when any entry fails.
//!
//! Mirrors the wire shape `sublime_registry::handlers::publish_version`
//! expects: a single-version packument body with one base64 `_attachments`
//! entry, `PUT` to `/<name>`. Rollback reuses the same registry's
//! unpublish-of-version path (`GET` the packument for `_rev`, `PUT` a new
//! document to `/<name>/-/rev/<rev>` without the failed version).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use base64::Engine as _;
use futures::stream::{self, StreamExt};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::error::{PublishError, PublishResult};
use crate::plan::{PublishEntry, PublishPlan};
use crate::tarball::{build_tarball, PackedTarball};

const DEFAULT_CONCURRENCY: usize = 8;

/// One entry's outcome once uploaded (or rolled back).
#[derive(Debug, Clone)]
pub struct PublishedEntry {
    /// The package name.
    pub name: String,
    /// The version it was published as.
    pub version: String,
}

/// The result of executing a [`PublishPlan`].
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// Every entry published successfully.
    Success {
        /// Entries in the order they were confirmed published.
        published: Vec<PublishedEntry>,
    },
    /// At least one entry failed; everything already published was rolled
    /// back (best-effort — see `rollback_failures`).
    Failed {
        /// The error that aborted the run.
        cause: PublishError,
        /// Entries that were successfully rolled back.
        rolled_back: Vec<PublishedEntry>,
        /// Entries rollback itself could not undo; the registry may still
        /// hold these versions.
        rollback_failures: Vec<PublishError>,
    },
}

fn attachment_filename(name: &str, version: &str) -> String {
    let short_name = name.rsplit('/').next().unwrap_or(name);
    format!("{short_name}-{version}.tgz")
}

fn publish_body(entry: &PublishEntry, packed: &PackedTarball) -> PublishResult<Value> {
    let manifest_json: Value = serde_json::from_str(
        &packed.manifest.to_json_string().map_err(|e| PublishError::Pack { package: entry.name.clone(), message: e.to_string() })?,
    )
    .map_err(|e| PublishError::Pack { package: entry.name.clone(), message: e.to_string() })?;

    let filename = attachment_filename(&entry.name, &entry.version);
    let encoded = base64::engine::general_purpose::STANDARD.encode(&packed.bytes);

    Ok(json!({
        "name": entry.name,
        "versions": {
            entry.version.clone(): {
                "name": entry.name,
                "version": entry.version,
                "dist": { "integrity": packed.integrity },
                "_manifest": manifest_json,
            }
        },
        "dist-tags": { "latest": entry.version },
        "_attachments": {
            filename: {
                "content_type": "application/octet-stream",
                "data": encoded,
                "length": packed.bytes.len(),
            }
        }
    }))
}

async fn upload_one(client: &reqwest::Client, registry_url: &str, entry: &PublishEntry) -> PublishResult<PublishedEntry> {
    let owned_entry = entry.clone();
    let packed = tokio::task::spawn_blocking(move || build_tarball(&owned_entry))
        .await
        .map_err(|e| PublishError::Pack { package: entry.name.clone(), message: e.to_string() })??;
    let body = publish_body(entry, &packed)?;

    let url = format!("{}/{}", registry_url.trim_end_matches('/'), entry.name);
    let response = client
        .put(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| PublishError::RegistryUnreachable(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        return Err(PublishError::RegistryRejected {
            package: entry.name.clone(),
            version: entry.version.clone(),
            message: format!("{status}: {message}"),
        });
    }

    Ok(PublishedEntry { name: entry.name.clone(), version: entry.version.clone() })
}

async fn unpublish_one(client: &reqwest::Client, registry_url: &str, entry: &PublishedEntry) -> PublishResult<()> {
    unpublish_version(client, registry_url, &entry.name, &entry.version).await
}

/// Removes one version from a package's packument via the registry's
/// unpublish-of-version path: `GET` the packument for `_rev`, strip the
/// version from `versions`/`dist-tags`, then `PUT` the result to
/// `/<name>/-/rev/<rev>`.
///
/// Shared by rollback (this module) and the pruner, which both need to
/// remove a single version without touching any other.
///
/// # Errors
/// Returns [`PublishError::RollbackFailed`] if the packument can't be
/// fetched, is missing `_rev`, or the registry rejects the write.
pub async fn unpublish_version(client: &reqwest::Client, registry_url: &str, name: &str, version: &str) -> PublishResult<()> {
    let packument_url = format!("{}/{}", registry_url.trim_end_matches('/'), name);
    let response = client
        .get(&packument_url)
        .send()
        .await
        .map_err(|e| PublishError::RollbackFailed { package: name.to_string(), version: version.to_string(), message: e.to_string() })?;
    let mut doc: Value = response
        .json()
        .await
        .map_err(|e| PublishError::RollbackFailed { package: name.to_string(), version: version.to_string(), message: e.to_string() })?;

    let rev = doc
        .get("_rev")
        .and_then(Value::as_str)
        .ok_or_else(|| PublishError::RollbackFailed {
            package: name.to_string(),
            version: version.to_string(),
            message: "packument missing _rev".to_string(),
        })?
        .to_string();

    if let Some(versions) = doc.get_mut("versions").and_then(Value::as_object_mut) {
        versions.remove(version);
    }
    if let Some(tags) = doc.get_mut("dist-tags").and_then(Value::as_object_mut) {
        tags.retain(|_, v| v.as_str() != Some(version));
    }

    let rev_url = format!("{}/{name}/-/rev/{rev}", registry_url.trim_end_matches('/'));
    let response = client
        .put(&rev_url)
        .json(&doc)
        .send()
        .await
        .map_err(|e| PublishError::RollbackFailed { package: name.to_string(), version: version.to_string(), message: e.to_string() })?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(PublishError::RollbackFailed {
            package: name.to_string(),
            version: version.to_string(),
            message: format!("unpublish rejected with {status}"),
        });
    }
    Ok(())
}

/// Executes `plan` against `registry_url` with up to `concurrency` uploads
/// in flight at once (`None` uses the default of 8).
///
/// On the first failure, outstanding uploads are left to finish (their
/// results are discarded) and every already-published entry is rolled back
/// best-effort via unpublish-of-version.
pub async fn execute_plan(client: &reqwest::Client, registry_url: &str, plan: &PublishPlan, concurrency: Option<usize>) -> ExecutionOutcome {
    let concurrency = concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1);
    let aborted = Arc::new(AtomicBool::new(false));
    let published = Arc::new(Mutex::new(Vec::<PublishedEntry>::new()));
    let first_error: Arc<Mutex<Option<PublishError>>> = Arc::new(Mutex::new(None));

    stream::iter(plan.packages.iter())
        .map(|entry| {
            let client = client.clone();
            let registry_url = registry_url.to_string();
            let aborted = Arc::clone(&aborted);
            let published = Arc::clone(&published);
            let first_error = Arc::clone(&first_error);
            async move {
                if aborted.load(Ordering::SeqCst) {
                    return;
                }
                match upload_one(&client, &registry_url, entry).await {
                    Ok(published_entry) => {
                        published.lock().await.push(published_entry);
                    }
                    Err(e) => {
                        aborted.store(true, Ordering::SeqCst);
                        let mut slot = first_error.lock().await;
                        if slot.is_none() {
                            *slot = Some(e);
                        }
                    }
                }
            }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<()>>()
        .await;

    let cause = first_error.lock().await.take();
    let published_entries = published.lock().await.clone();

    let Some(cause) = cause else {
        return ExecutionOutcome::Success { published: published_entries };
    };

    let mut rolled_back = Vec::new();
    let mut rollback_failures = Vec::new();
    for entry in &published_entries {
        match unpublish_one(client, registry_url, entry).await {
            Ok(()) => rolled_back.push(entry.clone()),
            Err(e) => rollback_failures.push(e),
        }
    }

    ExecutionOutcome::Failed { cause, rolled_back, rollback_failures }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_filename_strips_scope() {
        assert_eq!(attachment_filename("@acme/left-pad", "1.0.0"), "left-pad-1.0.0.tgz");
    }
}
