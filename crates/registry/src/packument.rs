//! The packument: the metadata document for one package name, spanning
//! every version pkglab has stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `dist` block of a version entry: tarball location and integrity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dist {
    /// URL the tarball can be fetched from.
    pub tarball: String,
    /// Subresource Integrity string, e.g. `sha512-...`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    /// Legacy shasum field some clients still read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shasum: Option<String>,
}

/// One version's metadata: the full `package.json` contents plus `dist`,
/// preserved as a JSON object since its shape is the union of everything a
/// client may have published under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionMeta {
    /// Every field of the published manifest, `dist` included.
    #[serde(flatten)]
    pub manifest: Value,
    /// Tarball location and integrity, kept separately so the router can
    /// rewrite `dist.tarball` without re-parsing the whole manifest blob.
    pub dist: Dist,
}

/// A base64-encoded tarball attachment, present only on the publish wire
/// format; stripped from the persisted packument after commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// MIME content type, always `application/octet-stream` in practice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Base64-encoded tarball bytes.
    pub data: String,
    /// Declared byte length of the decoded data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

/// The complete metadata document for one package name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packument {
    /// Package name, doubling as storage key.
    #[serde(rename = "_id")]
    pub id: String,
    /// Monotonic revision string, `"<n>-<tag>"`.
    #[serde(rename = "_rev")]
    pub rev: String,
    /// Package name (npm duplicates `_id` here by convention).
    pub name: String,
    /// Tag to version mapping, e.g. `{"latest": "1.2.3"}`.
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: BTreeMap<String, String>,
    /// Every published version's metadata, keyed by version string.
    #[serde(default)]
    pub versions: BTreeMap<String, VersionMeta>,
    /// ISO timestamps per version, plus `created`/`modified` keys.
    #[serde(default)]
    pub time: BTreeMap<String, String>,
    /// Transient publish-wire attachments; never present once persisted.
    #[serde(rename = "_attachments", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attachments: BTreeMap<String, Attachment>,
}

impl Packument {
    /// Builds an empty packument for a brand-new package name at revision 0.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: name.to_string(),
            rev: "0-0".to_string(),
            name: name.to_string(),
            dist_tags: BTreeMap::new(),
            versions: BTreeMap::new(),
            time: BTreeMap::new(),
            attachments: BTreeMap::new(),
        }
    }

    /// Parses the leading sequence number out of `_rev` (`"<n>-<tag>"`).
    #[must_use]
    pub fn rev_sequence(&self) -> u64 {
        self.rev.split('-').next().and_then(|s| s.parse().ok()).unwrap_or(0)
    }

    /// Bumps `_rev` to the next sequence number, tagging it with a fragment
    /// of the new revision string (npm's revisions are opaque to clients,
    /// so any unique suffix is valid; pkglab uses a running counter).
    pub fn bump_rev(&mut self) {
        let next = self.rev_sequence() + 1;
        self.rev = format!("{next}-pkglab");
    }

    /// Strips `_attachments` for the persisted form; called once the
    /// tarball bytes it referenced have been committed to disk.
    pub fn strip_attachments(&mut self) {
        self.attachments.clear();
    }

    /// `true` if every `dist-tags` value and every `time` key references an
    /// existing version — the storage engine's core invariant.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.dist_tags.values().all(|v| self.versions.contains_key(v))
            && self.time.keys().all(|v| v == "created" || v == "modified" || self.versions.contains_key(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_packument_starts_at_revision_zero() {
        let doc = Packument::new("left-pad");
        assert_eq!(doc.rev, "0-0");
        assert_eq!(doc.rev_sequence(), 0);
    }

    #[test]
    fn bump_rev_increments_sequence() {
        let mut doc = Packument::new("left-pad");
        doc.bump_rev();
        doc.bump_rev();
        assert_eq!(doc.rev_sequence(), 2);
    }

    #[test]
    fn consistency_check_flags_dangling_dist_tag() {
        let mut doc = Packument::new("left-pad");
        doc.dist_tags.insert("latest".to_string(), "1.0.0".to_string());
        assert!(!doc.is_consistent());
    }
}
