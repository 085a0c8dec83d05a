//! Persisted fingerprint state: the last known hash per package per tag,
//! keyed across every workspace root pkglab has touched.
//!
//! Stored at `<home>/fingerprints.json` (see
//! `sublime_standard_tools::paths::PkglabPaths::fingerprints_file`). A
//! missing file behaves like an empty state rather than an error, so the
//! first run in a fresh home directory always starts cold.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FingerprintError, FingerprintResult};
use crate::hash::Fingerprint;

/// Key for a publish tag when no explicit tag was given.
pub const UNTAGGED: &str = "__untagged__";

/// Identifies one fingerprint record: a package, in a workspace, on a tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FingerprintKey {
    /// Canonical workspace root path, as a string for JSON-map-key use.
    pub workspace_root: String,
    /// Workspace package name.
    pub package_name: String,
    /// Publish tag, or [`UNTAGGED`] when none was given.
    pub tag: String,
}

impl FingerprintKey {
    /// Builds a key, substituting [`UNTAGGED`] for an absent tag.
    #[must_use]
    pub fn new(workspace_root: impl Into<String>, package_name: impl Into<String>, tag: Option<&str>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            package_name: package_name.into(),
            tag: tag.unwrap_or(UNTAGGED).to_string(),
        }
    }

    fn encode(&self) -> String {
        format!("{}\u{1}{}\u{1}{}", self.workspace_root, self.package_name, self.tag)
    }

    fn decode(raw: &str) -> Option<Self> {
        let mut parts = raw.split('\u{1}');
        let workspace_root = parts.next()?.to_string();
        let package_name = parts.next()?.to_string();
        let tag = parts.next()?.to_string();
        if parts.next().is_some() {
            return None;
        }
        Some(Self { workspace_root, package_name, tag })
    }
}

/// A fingerprint record: the package's version at hash time plus its
/// content hash and file stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    /// Package version string at the time this fingerprint was computed.
    pub version: String,
    /// Content hash and fast-path file stats.
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
}

/// The full persisted fingerprint state, flattened to a single encoded-key
/// map for straightforward JSON round-tripping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FingerprintState {
    records: BTreeMap<String, FingerprintRecord>,
}

impl FingerprintState {
    /// Loads state from `path`, returning an empty state if the file does
    /// not exist.
    ///
    /// # Errors
    /// Returns [`FingerprintError::Io`] if the file exists but cannot be
    /// read, or if its contents are not valid JSON.
    pub fn load(path: &Path) -> FingerprintResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| FingerprintError::Io { path: path.to_path_buf(), message: e.to_string() })?;
        serde_json::from_str(&raw)
            .map_err(|e| FingerprintError::Io { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Writes this state to `path` as pretty JSON via a temp-file-then-rename,
    /// matching the storage engine's crash-safety convention.
    ///
    /// # Errors
    /// Returns [`FingerprintError::Io`] on any I/O or serialization failure.
    pub fn save(&self, path: &Path) -> FingerprintResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FingerprintError::Io { path: parent.to_path_buf(), message: e.to_string() })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FingerprintError::Io { path: path.to_path_buf(), message: e.to_string() })?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| FingerprintError::Io { path: tmp_path.clone(), message: e.to_string() })?;
        std::fs::rename(&tmp_path, path)
            .map_err(|e| FingerprintError::Io { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Looks up a record by key.
    #[must_use]
    pub fn get(&self, key: &FingerprintKey) -> Option<&FingerprintRecord> {
        self.records.get(&key.encode())
    }

    /// Inserts or replaces a record.
    pub fn set(&mut self, key: &FingerprintKey, record: FingerprintRecord) {
        self.records.insert(key.encode(), record);
    }

    /// Removes a record, e.g. when its package or workspace is pruned away.
    pub fn remove(&mut self, key: &FingerprintKey) {
        self.records.remove(&key.encode());
    }

    /// Iterates every stored key, decoding it back to its structured form.
    /// Malformed keys (which should never occur outside hand-edited state)
    /// are skipped rather than panicking.
    pub fn keys(&self) -> impl Iterator<Item = FingerprintKey> + '_ {
        self.records.keys().filter_map(|raw| FingerprintKey::decode(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::FileStat;

    fn sample_record() -> FingerprintRecord {
        FingerprintRecord {
            version: "0.0.0-abc123.42".to_string(),
            fingerprint: Fingerprint {
                hash: "deadbeef".to_string(),
                file_stats: vec![FileStat { path: "index.js".into(), mtime_ms: 0, size: 0 }],
            },
        }
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("fingerprints.json");
        let state = FingerprintState::load(&path).expect("load");
        assert!(state.keys().next().is_none());
    }

    #[test]
    fn round_trips_through_disk() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("fingerprints.json");
        let key = FingerprintKey::new("/repo", "@scope/pkg", Some("canary"));

        let mut state = FingerprintState::default();
        state.set(&key, sample_record());
        state.save(&path).expect("save");

        let loaded = FingerprintState::load(&path).expect("load");
        assert_eq!(loaded.get(&key), Some(&sample_record()));
    }

    #[test]
    fn untagged_key_uses_reserved_tag() {
        let key = FingerprintKey::new("/repo", "pkg", None);
        assert_eq!(key.tag, UNTAGGED);
    }

    #[test]
    fn remove_drops_the_record() {
        let key = FingerprintKey::new("/repo", "pkg", None);
        let mut state = FingerprintState::default();
        state.set(&key, sample_record());
        state.remove(&key);
        assert!(state.get(&key).is_none());
    }
}
