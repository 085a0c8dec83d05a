//! Request handling logic, independent of axum's extractor plumbing so it
//! stays easy to exercise directly in tests.

use chrono::Utc;
use serde_json::Value;

use crate::error::{RegistryError, RegistryResult};
use crate::naming::{sanitize_attachment_filename, validate_package_name};
use crate::packument::{Attachment, Dist, Packument, VersionMeta};
use crate::queue_handle::{EnqueueOutcome, PublishRequest, WorkspaceQueueStatus};
use crate::state::AppState;
use crate::upstream;

/// `GET /-/ping`, `GET /-/ready`.
#[must_use]
pub fn liveness() -> Value {
    serde_json::json!({"ok": true})
}

/// `GET /-/<internal>/index`.
pub async fn index(state: &AppState) -> String {
    state.storage.index_json(crate::index::build_index).await
}

/// `GET /-/<internal>/publish/status`.
pub async fn publish_status(state: &AppState) -> Vec<WorkspaceQueueStatus> {
    state.queue.status().await
}

/// `POST /-/<internal>/publish`.
pub async fn enqueue_publish(state: &AppState, request: PublishRequest) -> EnqueueOutcome {
    state.queue.enqueue(request).await
}

/// Basename of a package name for tarball file naming (`@scope/pkg` -> `pkg`).
fn tarball_basename(name: &str, version: &str) -> String {
    let short_name = name.rsplit('/').next().unwrap_or(name);
    format!("{short_name}-{version}.tgz")
}

/// `PUT /<name>`: publish a new version.
///
/// # Errors
/// Returns [`RegistryError::BadRequest`] if the body isn't shaped like a
/// publish wire packument (exactly one version, at least one attachment),
/// [`RegistryError::Conflict`] if the version already exists, or
/// [`RegistryError::Io`]/[`RegistryError::Internal`] on storage failure.
pub async fn publish_version(state: &AppState, name: &str, body: Value) -> RegistryResult<()> {
    validate_package_name(name)?;

    let versions = body
        .get("versions")
        .and_then(Value::as_object)
        .ok_or_else(|| RegistryError::BadRequest("publish body missing versions".to_string()))?;
    if versions.len() != 1 {
        return Err(RegistryError::BadRequest(format!(
            "publish body must declare exactly one version, got {}",
            versions.len()
        )));
    }
    let (version, version_manifest) = versions.iter().next().expect("len checked above");

    let attachments = body
        .get("_attachments")
        .and_then(Value::as_object)
        .ok_or_else(|| RegistryError::BadRequest("publish body missing _attachments".to_string()))?;
    if attachments.is_empty() {
        return Err(RegistryError::BadRequest("publish body has no attachments".to_string()));
    }

    let dist_tags: Vec<(String, String)> = body
        .get("dist-tags")
        .and_then(Value::as_object)
        .map(|tags| {
            tags.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();

    let existing = state.storage.get(name).await;
    if let Some(existing) = &existing {
        if existing.versions.contains_key(version) {
            return Err(RegistryError::Conflict(format!("version {version} already exists for {name}")));
        }
    }

    for (filename, attachment) in attachments {
        let basename = sanitize_attachment_filename(filename)?;
        let attachment: Attachment = serde_json::from_value(attachment.clone())
            .map_err(|e| RegistryError::BadRequest(format!("malformed attachment {filename}: {e}")))?;
        if attachment.data.is_empty() {
            return Err(RegistryError::BadRequest(format!("attachment {filename} has no data")));
        }
        let bytes = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &attachment.data)
            .map_err(|e| RegistryError::BadRequest(format!("attachment {filename} is not valid base64: {e}")))?;
        state.storage.save_tarball(name, &basename, &bytes).await?;
    }

    let basename = tarball_basename(name, version);
    let tarball_url = format!("{}/{name}/-/{basename}", state.registry_base_url.trim_end_matches('/'));

    let dist = serde_json::from_value::<Dist>(version_manifest.get("dist").cloned().unwrap_or_default())
        .unwrap_or(Dist { tarball: String::new(), integrity: None, shasum: None });

    let mut manifest = version_manifest.clone();
    if let Value::Object(map) = &mut manifest {
        map.remove("dist");
    }

    let new_version_meta = VersionMeta {
        manifest,
        dist: Dist { tarball: tarball_url, integrity: dist.integrity, shasum: dist.shasum },
    };

    state
        .storage
        .with_lock(name, move |current| {
            let mut doc = current.unwrap_or_else(|| Packument::new(name));
            if doc.versions.contains_key(version) {
                return Err(RegistryError::Conflict(format!("version {version} already exists for {name}")));
            }
            doc.versions.insert(version.clone(), new_version_meta);
            for (tag, tag_version) in &dist_tags {
                doc.dist_tags.insert(tag.clone(), tag_version.clone());
            }
            doc.time.insert(version.clone(), Utc::now().to_rfc3339());
            doc.bump_rev();
            Ok((doc, ()))
        })
        .await
}

/// `PUT /-/package/<name>/dist-tags/<tag>`.
///
/// # Errors
/// Returns [`RegistryError::NotFound`] if the package or the version the
/// tag would point to doesn't exist.
pub async fn set_dist_tag(state: &AppState, name: &str, tag: &str, version: String) -> RegistryResult<()> {
    validate_package_name(name)?;
    let version_clone = version.clone();
    let tag = tag.to_string();

    state
        .storage
        .with_lock(name, move |current| {
            let mut doc = current.ok_or_else(|| RegistryError::NotFound(format!("package {name} not found")))?;
            if !doc.versions.contains_key(&version_clone) {
                return Err(RegistryError::NotFound(format!("version {version_clone} not found for {name}")));
            }
            doc.dist_tags.insert(tag.clone(), version_clone.clone());
            doc.bump_rev();
            Ok((doc, ()))
        })
        .await
}

/// `GET`/`HEAD /<name>`: fetch a packument, merged with upstream when local
/// data exists and falling through to a pure upstream proxy otherwise.
///
/// # Errors
/// Returns [`RegistryError::NotFound`] if nothing local exists and no
/// upstream is configured, or [`RegistryError::BadGateway`] if upstream is
/// configured but unreachable and nothing local exists either.
pub async fn get_packument(state: &AppState, name: &str) -> RegistryResult<Value> {
    validate_package_name(name)?;

    let local = state.storage.get(name).await;

    let Some(upstream_url) = &state.upstream_url else {
        let doc = local.ok_or_else(|| RegistryError::NotFound(format!("{name} not found")))?;
        return serde_json::to_value(&doc).map_err(|e| RegistryError::Internal(e.to_string()));
    };

    let Some(local) = local else {
        // Nothing local: pure proxy, no merge logic needed.
        return upstream::fetch_packument(&state.http_client, upstream_url, name).await;
    };

    if let Some(cached) = state.storage.fresh_merged(name).await {
        return serde_json::to_value(&cached).map_err(|e| RegistryError::Internal(e.to_string()));
    }

    let merged = match upstream::fetch_packument(&state.http_client, upstream_url, name).await {
        Ok(upstream_doc) => upstream::merge_with_local(upstream_doc, &local, &state.registry_base_url),
        Err(_) => local,
    };

    state.storage.cache_merged(name, merged.clone()).await;
    serde_json::to_value(&merged).map_err(|e| RegistryError::Internal(e.to_string()))
}

/// Tarball bytes plus the content type to serve them with.
pub struct TarballResponse {
    /// Tarball bytes.
    pub bytes: Vec<u8>,
    /// Response headers to forward as-is (only set for proxied tarballs).
    pub forwarded_headers: Option<axum::http::HeaderMap>,
}

/// `GET`/`HEAD /<name>/-/<file>.tgz`.
///
/// # Errors
/// Returns [`RegistryError::NotFound`] if the file doesn't exist locally
/// and no upstream is configured, or [`RegistryError::BadGateway`] if the
/// upstream proxy fails.
pub async fn get_tarball(state: &AppState, name: &str, file: &str) -> RegistryResult<TarballResponse> {
    validate_package_name(name)?;
    let basename = sanitize_attachment_filename(file)?;

    let local_path = state.storage.root().join(name).join(&basename);
    if let Ok(bytes) = tokio::fs::read(&local_path).await {
        return Ok(TarballResponse { bytes, forwarded_headers: None });
    }

    let Some(upstream_url) = &state.upstream_url else {
        return Err(RegistryError::NotFound(format!("tarball {basename} not found for {name}")));
    };

    let proxied = upstream::fetch_tarball(&state.http_client, upstream_url, name, &basename).await?;
    Ok(TarballResponse { bytes: proxied.bytes.to_vec(), forwarded_headers: Some(proxied.headers) })
}

/// `PUT /<name>/-/rev/<rev>`: unpublish-of-version. Diffs old vs new
/// `versions` to find removed keys, persists the new document, then
/// deletes each removed version's tarball file.
///
/// # Errors
/// Returns [`RegistryError::Conflict`] if `rev` doesn't match the current
/// `_rev`, or [`RegistryError::NotFound`] if the package doesn't exist.
pub async fn update_rev(state: &AppState, name: &str, rev: &str, new_doc: Packument) -> RegistryResult<()> {
    validate_package_name(name)?;
    let rev = rev.to_string();

    let removed = state
        .storage
        .with_lock(name, move |current| {
            let current = current.ok_or_else(|| RegistryError::NotFound(format!("package {name} not found")))?;
            if current.rev != rev {
                return Err(RegistryError::Conflict(format!(
                    "revision mismatch for {name}: expected {}, got {rev}",
                    current.rev
                )));
            }
            let mut next = new_doc.clone();
            next.bump_rev();
            let removed: Vec<String> =
                current.versions.keys().filter(|v| !next.versions.contains_key(*v)).cloned().collect();
            Ok((next, removed))
        })
        .await?;

    for version in removed {
        state.storage.delete_tarball(name, &tarball_basename(name, &version)).await;
    }
    Ok(())
}

/// `DELETE /<name>/-/rev/<rev>`: removes the entire package.
///
/// # Errors
/// Returns [`RegistryError::Conflict`] if `rev` doesn't match the current
/// `_rev`, or [`RegistryError::NotFound`] if the package doesn't exist.
pub async fn delete_package(state: &AppState, name: &str, rev: &str) -> RegistryResult<()> {
    validate_package_name(name)?;
    let current = state.storage.get(name).await.ok_or_else(|| RegistryError::NotFound(format!("{name} not found")))?;
    if current.rev != rev {
        return Err(RegistryError::Conflict(format!(
            "revision mismatch for {name}: expected {}, got {rev}",
            current.rev
        )));
    }
    state.storage.delete_package(name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue_handle::{EnqueueStatus, PublishQueueHandle};
    use std::sync::Arc;

    struct StubQueue;

    #[async_trait::async_trait]
    impl PublishQueueHandle for StubQueue {
        async fn enqueue(&self, _request: PublishRequest) -> EnqueueOutcome {
            EnqueueOutcome { job_id: "job-1".to_string(), status: EnqueueStatus::Queued }
        }
        async fn status(&self) -> Vec<WorkspaceQueueStatus> {
            Vec::new()
        }
    }

    async fn test_state(tmp: &std::path::Path) -> AppState {
        AppState {
            storage: Arc::new(crate::storage::Storage::load_all(tmp).await.expect("load_all")),
            http_client: reqwest::Client::new(),
            registry_base_url: "http://127.0.0.1:4873".to_string(),
            upstream_url: None,
            queue: Arc::new(StubQueue),
        }
    }

    fn publish_body(version: &str, tarball_b64: &str) -> Value {
        serde_json::json!({
            "name": "left-pad",
            "versions": {
                version: {"name": "left-pad", "version": version, "dist": {}}
            },
            "dist-tags": {"latest": version},
            "_attachments": {
                format!("left-pad-{version}.tgz"): {"content_type": "application/octet-stream", "data": tarball_b64, "length": 4}
            }
        })
    }

    #[tokio::test]
    async fn publish_then_fetch_round_trips() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = test_state(tmp.path()).await;
        let body = publish_body("1.0.0", "ZGF0YQ==");

        publish_version(&state, "left-pad", body).await.expect("publish");
        let doc = get_packument(&state, "left-pad").await.expect("get");
        assert_eq!(doc["dist-tags"]["latest"], "1.0.0");
        assert!(doc["versions"]["1.0.0"].is_object());
    }

    #[tokio::test]
    async fn republishing_the_same_version_conflicts() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = test_state(tmp.path()).await;
        let body = publish_body("1.0.0", "ZGF0YQ==");

        publish_version(&state, "left-pad", body.clone()).await.expect("publish");
        let err = publish_version(&state, "left-pad", body).await.unwrap_err();
        assert!(matches!(err, RegistryError::Conflict(_)));
    }

    #[tokio::test]
    async fn dist_tag_requires_existing_version() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = test_state(tmp.path()).await;
        publish_version(&state, "left-pad", publish_body("1.0.0", "ZGF0YQ==")).await.expect("publish");

        let err = set_dist_tag(&state, "left-pad", "latest", "9.9.9".to_string()).await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));

        set_dist_tag(&state, "left-pad", "canary", "1.0.0".to_string()).await.expect("set dist-tag");
        let doc = get_packument(&state, "left-pad").await.expect("get");
        assert_eq!(doc["dist-tags"]["canary"], "1.0.0");
    }

    #[tokio::test]
    async fn missing_package_without_upstream_is_not_found() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = test_state(tmp.path()).await;
        let err = get_packument(&state, "never-published").await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_name_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = test_state(tmp.path()).await;
        let err = get_packument(&state, "../escape").await.unwrap_err();
        assert!(matches!(err, RegistryError::BadRequest(_)));
    }
}
