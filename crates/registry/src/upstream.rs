//! Upstream proxy: fills in packuments and tarballs for names pkglab has
//! never published locally, and merges local overlays onto names it has.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName};
use log::warn;
use serde_json::Value;

use crate::error::{RegistryError, RegistryResult};
use crate::packument::Packument;

const PACKUMENT_TIMEOUT: Duration = Duration::from_secs(5);
const TARBALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Headers stripped from the upstream tarball response before it is
/// forwarded: the runtime already decoded the body, so these would corrupt
/// the client's framing if forwarded verbatim.
const STRIPPED_RESPONSE_HEADERS: &[&str] = &["content-encoding", "content-length"];

/// Fetches a package's packument from `upstream_url`, timing out after
/// [`PACKUMENT_TIMEOUT`].
///
/// # Errors
/// Returns [`RegistryError::BadGateway`] on timeout, transport failure, a
/// non-success status, or unparsable JSON.
pub async fn fetch_packument(client: &reqwest::Client, upstream_url: &str, name: &str) -> RegistryResult<Value> {
    let url = format!("{}/{}", upstream_url.trim_end_matches('/'), name);
    let response = client
        .get(&url)
        .timeout(PACKUMENT_TIMEOUT)
        .send()
        .await
        .map_err(|e| RegistryError::BadGateway(format!("fetching {name} from upstream: {e}")))?;

    if !response.status().is_success() {
        return Err(RegistryError::BadGateway(format!(
            "upstream returned {} for {name}",
            response.status()
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| RegistryError::BadGateway(format!("parsing upstream packument for {name}: {e}")))
}

/// Merges an upstream packument (base) with the local one (overlay): local
/// `versions`/`dist-tags` win on key collision, `_id`/`_rev`/`name` always
/// come from the local document, and every `dist.tarball` (local or
/// upstream-sourced) is rewritten to point at this registry.
#[must_use]
pub fn merge_with_local(upstream: Value, local: &Packument, registry_base_url: &str) -> Packument {
    let mut merged: Packument = match serde_json::from_value(upstream) {
        Ok(doc) => doc,
        Err(_) => Packument::new(&local.name),
    };

    merged.id = local.id.clone();
    merged.rev = local.rev.clone();
    merged.name = local.name.clone();

    for (version, meta) in &local.versions {
        merged.versions.insert(version.clone(), meta.clone());
    }
    for (tag, version) in &local.dist_tags {
        merged.dist_tags.insert(tag.clone(), version.clone());
    }
    for (version, time) in &local.time {
        merged.time.insert(version.clone(), time.clone());
    }
    merged.attachments.clear();

    for (version, meta) in &mut merged.versions {
        let basename = format!(
            "{}-{version}.tgz",
            local.name.rsplit('/').next().unwrap_or(&local.name)
        );
        meta.dist.tarball = format!(
            "{}/{}/-/{basename}",
            registry_base_url.trim_end_matches('/'),
            local.name
        );
    }

    merged
}

/// Outcome of a tarball proxy fetch: the response body plus the headers the
/// router should forward, already scrubbed.
pub struct ProxiedTarball {
    /// Tarball bytes.
    pub bytes: Bytes,
    /// Response headers safe to forward (encoding/length stripped).
    pub headers: HeaderMap,
}

/// Proxies a tarball fetch to `upstream_url`, timing out after
/// [`TARBALL_TIMEOUT`]. The outbound request is built fresh (the client's
/// own `authorization`/`host` headers are never copied onto it), and
/// `content-encoding`/`content-length` are stripped from the response
/// before forwarding.
///
/// # Errors
/// Returns [`RegistryError::BadGateway`] on timeout, transport failure, or a
/// non-success upstream status.
pub async fn fetch_tarball(
    client: &reqwest::Client,
    upstream_url: &str,
    name: &str,
    file: &str,
) -> RegistryResult<ProxiedTarball> {
    let url = format!("{}/{}/-/{file}", upstream_url.trim_end_matches('/'), name);
    let response = client
        .get(&url)
        .timeout(TARBALL_TIMEOUT)
        .send()
        .await
        .map_err(|e| RegistryError::BadGateway(format!("proxying tarball {file} for {name}: {e}")))?;

    if !response.status().is_success() {
        return Err(RegistryError::BadGateway(format!(
            "upstream returned {} for tarball {file}",
            response.status()
        )));
    }

    let mut headers = response.headers().clone();
    for name in STRIPPED_RESPONSE_HEADERS {
        if let Ok(header_name) = HeaderName::try_from(*name) {
            headers.remove(&header_name);
        } else {
            warn!("could not construct header name {name} to strip from proxy response");
        }
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| RegistryError::BadGateway(format!("reading proxied tarball {file}: {e}")))?;

    Ok(ProxiedTarball { bytes, headers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packument::{Dist, VersionMeta};

    #[test]
    fn merge_overlays_local_versions_and_rewrites_tarball_urls() {
        let upstream = serde_json::json!({
            "_id": "left-pad",
            "_rev": "99-upstream",
            "name": "left-pad",
            "dist-tags": {"latest": "1.0.0"},
            "versions": {
                "1.0.0": {"name": "left-pad", "version": "1.0.0", "dist": {"tarball": "https://registry.npmjs.org/left-pad/-/left-pad-1.0.0.tgz"}}
            },
            "time": {}
        });

        let mut local = Packument::new("left-pad");
        local.versions.insert(
            "0.0.0-abc.1".to_string(),
            VersionMeta {
                manifest: serde_json::json!({"name": "left-pad"}),
                dist: Dist {
                    tarball: "http://127.0.0.1:4873/left-pad/-/left-pad-0.0.0-abc.1.tgz".to_string(),
                    integrity: None,
                    shasum: None,
                },
            },
        );
        local.dist_tags.insert("canary".to_string(), "0.0.0-abc.1".to_string());

        let merged = merge_with_local(upstream, &local, "http://127.0.0.1:4873");

        assert!(merged.versions.contains_key("1.0.0"));
        assert!(merged.versions.contains_key("0.0.0-abc.1"));
        assert_eq!(
            merged.versions["1.0.0"].dist.tarball,
            "http://127.0.0.1:4873/left-pad/-/left-pad-1.0.0.tgz"
        );
        assert_eq!(merged.id, "left-pad");
        assert_eq!(merged.rev, local.rev);
    }
}
