//! Per-repo JSON sidecars: which consumer repositories pkglab knows about,
//! which packages it has linked into each, and whether fan-out should touch
//! them.
//!
//! One file per repo lives under `<home>/repos/`, named
//! `<short-hash>--<encoded-path>` so that renaming the physical directory a
//! repo lives in doesn't orphan its state (the hash is derived from the
//! canonicalized path, the encoded path is only for human readability when
//! browsing the directory).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{SyncError, SyncResult};

const MAX_ENCODED_PATH_LEN: usize = 80;
const HASH_PREFIX_LEN: usize = 12;

/// One manifest within a repo that references a linked dependency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkTarget {
    /// Directory containing the manifest (repo root or a workspace member).
    pub dir: PathBuf,
    /// The version-range string this manifest held before linking, used to
    /// restore it.
    pub original: String,
}

/// One linked dependency within a repo: its current linked version, the
/// manifests that reference it, and (if it came through a pnpm catalog)
/// which catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    /// The version currently linked in.
    pub current: String,
    /// Dist-tag this link tracks, if not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Name of the pnpm catalog this dependency is declared under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    /// Which file the catalog entry lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_format: Option<CatalogFormat>,
    /// Every manifest in the repo that references this dependency.
    pub targets: Vec<LinkTarget>,
}

/// Where a pnpm catalog entry is declared.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogFormat {
    /// `package.json`'s `catalog`/`catalogs` fields.
    PackageJson,
    /// `pnpm-workspace.yaml`'s `catalog`/`catalogs` fields.
    PnpmWorkspaceYaml,
}

/// Per-repo state: one JSON sidecar under `<home>/repos/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoState {
    /// Canonicalized absolute path to the repo's working directory.
    pub path: PathBuf,
    /// Whether `pub` fan-out touches this repo.
    pub active: bool,
    /// Unix-epoch milliseconds this repo was last touched by `add`/`restore`/fan-out.
    pub last_used: u64,
    /// Linked packages by name.
    pub packages: BTreeMap<String, Link>,
}

impl RepoState {
    /// Creates a fresh, inactive state for `path` with no linked packages.
    #[must_use]
    pub fn new(path: PathBuf, now_ms: u64) -> Self {
        Self { path, active: false, last_used: now_ms, packages: BTreeMap::new() }
    }

    /// `package.json.name` if readable, else the directory's basename.
    #[must_use]
    pub fn display_name(&self) -> String {
        let manifest_path = self.path.join("package.json");
        if let Ok(manifest) = sublime_graph_tools::manifest::PackageManifest::read(&manifest_path) {
            return manifest.name;
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Current Unix-epoch milliseconds.
#[must_use]
pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

fn encode_path_component(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut encoded: String =
        raw.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' }).collect();
    encoded = encoded.trim_matches('_').to_string();
    if encoded.len() > MAX_ENCODED_PATH_LEN {
        encoded.truncate(MAX_ENCODED_PATH_LEN);
    }
    if encoded.is_empty() {
        encoded.push_str("repo");
    }
    encoded
}

fn short_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    hex_prefix(&digest, HASH_PREFIX_LEN)
}

fn hex_prefix(bytes: &[u8], len: usize) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>().chars().take(len).collect()
}

/// Filename (without directory) this repo's sidecar is stored under,
/// derived from its canonicalized path so a later rename of the physical
/// directory doesn't change it.
#[must_use]
pub fn sidecar_filename(canonical_path: &Path) -> String {
    format!("{}--{}.json", short_hash(canonical_path), encode_path_component(canonical_path))
}

fn sidecar_path(repos_dir: &Path, canonical_path: &Path) -> PathBuf {
    repos_dir.join(sidecar_filename(canonical_path))
}

fn write_atomic(path: &Path, contents: &str) -> SyncResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SyncError::Io { path: parent.to_path_buf(), message: e.to_string() })?;
    }
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, contents)
        .map_err(|e| SyncError::Io { path: tmp_path.clone(), message: e.to_string() })?;
    std::fs::rename(&tmp_path, path).map_err(|e| SyncError::Io { path: path.to_path_buf(), message: e.to_string() })
}

/// Loads every repo-state sidecar found directly under `repos_dir`.
/// Malformed files are skipped with a warning rather than failing the scan.
///
/// # Errors
/// Returns [`SyncError::Io`] if `repos_dir` itself cannot be read.
pub fn load_all(repos_dir: &Path) -> SyncResult<Vec<RepoState>> {
    if !repos_dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(repos_dir)
        .map_err(|e| SyncError::Io { path: repos_dir.to_path_buf(), message: e.to_string() })?;

    let mut states = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<RepoState>(&raw) {
                Ok(state) => states.push(state),
                Err(e) => log::warn!("skipping unparsable repo state at {}: {e}", path.display()),
            },
            Err(e) => log::warn!("skipping unreadable repo state at {}: {e}", path.display()),
        }
    }
    Ok(states)
}

/// Loads the repo state for `path` (canonicalized before lookup), or
/// `None` if no sidecar exists for it yet.
///
/// # Errors
/// Returns [`SyncError::Io`] on I/O failure other than "not found", or
/// [`SyncError::RepoStateCorrupt`] if the sidecar exists but can't be parsed.
pub fn load_by_path(repos_dir: &Path, path: &Path) -> SyncResult<Option<RepoState>> {
    let canonical =
        path.canonicalize().map_err(|e| SyncError::Io { path: path.to_path_buf(), message: e.to_string() })?;
    let sidecar = sidecar_path(repos_dir, &canonical);
    if !sidecar.is_file() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&sidecar)
        .map_err(|e| SyncError::Io { path: sidecar.clone(), message: e.to_string() })?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| SyncError::RepoStateCorrupt { path: sidecar, message: e.to_string() })
}

/// Writes `state` to its sidecar under `repos_dir`, atomically.
///
/// # Errors
/// Returns [`SyncError::Io`] on I/O failure or if `state.path` can't be
/// serialized (which would indicate a bug, since [`RepoState`] only holds
/// plain data).
pub fn save(repos_dir: &Path, state: &RepoState) -> SyncResult<()> {
    let sidecar = sidecar_path(repos_dir, &state.path);
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| SyncError::Io { path: sidecar.clone(), message: e.to_string() })?;
    write_atomic(&sidecar, &json)
}

/// Deletes the sidecar for `path`, if one exists. A no-op if it doesn't.
///
/// # Errors
/// Returns [`SyncError::Io`] on I/O failure other than "not found".
pub fn delete_by_path(repos_dir: &Path, path: &Path) -> SyncResult<()> {
    let Ok(canonical) = path.canonicalize() else { return Ok(()) };
    let sidecar = sidecar_path(repos_dir, &canonical);
    if sidecar.is_file() {
        std::fs::remove_file(&sidecar)
            .map_err(|e| SyncError::Io { path: sidecar.clone(), message: e.to_string() })?;
    }
    Ok(())
}

/// Sets `state.active` and persists the change.
///
/// # Errors
/// Returns [`SyncError::Io`] if the updated state cannot be written.
pub fn set_active(repos_dir: &Path, path: &Path, active: bool) -> SyncResult<RepoState> {
    let canonical =
        path.canonicalize().map_err(|e| SyncError::Io { path: path.to_path_buf(), message: e.to_string() })?;
    let mut state = load_by_path(repos_dir, &canonical)?
        .unwrap_or_else(|| RepoState::new(canonical.clone(), now_ms()));
    state.active = active;
    state.last_used = now_ms();
    save(repos_dir, &state)?;
    Ok(state)
}

/// Every repo with `active == true`.
///
/// # Errors
/// Returns [`SyncError::Io`] if `repos_dir` cannot be scanned.
pub fn active_repos(repos_dir: &Path) -> SyncResult<Vec<RepoState>> {
    Ok(load_all(repos_dir)?.into_iter().filter(|r| r.active).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_filename_is_stable_for_a_path() {
        let a = sidecar_filename(Path::new("/repo/one"));
        let b = sidecar_filename(Path::new("/repo/one"));
        assert_eq!(a, b);
        assert!(a.ends_with(".json"));
    }

    #[test]
    fn sidecar_filename_differs_across_paths() {
        let a = sidecar_filename(Path::new("/repo/one"));
        let b = sidecar_filename(Path::new("/repo/two"));
        assert_ne!(a, b);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let repos_dir = tmp.path().join("repos");
        let repo_path = tmp.path().join("consumer");
        std::fs::create_dir_all(&repo_path).expect("mkdir");

        let mut state = RepoState::new(repo_path.canonicalize().expect("canonicalize"), now_ms());
        state.active = true;
        state.packages.insert(
            "left-pad".to_string(),
            Link {
                current: "0.0.0-pkglab.1".to_string(),
                tag: None,
                catalog_name: None,
                catalog_format: None,
                targets: vec![LinkTarget { dir: repo_path.clone(), original: "^1.0.0".to_string() }],
            },
        );

        save(&repos_dir, &state).expect("save");
        let loaded = load_by_path(&repos_dir, &repo_path).expect("load").expect("present");
        assert_eq!(loaded.active, state.active);
        assert_eq!(loaded.packages.len(), 1);
    }

    #[test]
    fn missing_repo_loads_as_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let repo_path = tmp.path().join("consumer");
        std::fs::create_dir_all(&repo_path).expect("mkdir");
        let loaded = load_by_path(&tmp.path().join("repos"), &repo_path).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn set_active_toggles_and_persists() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let repos_dir = tmp.path().join("repos");
        let repo_path = tmp.path().join("consumer");
        std::fs::create_dir_all(&repo_path).expect("mkdir");

        set_active(&repos_dir, &repo_path, true).expect("activate");
        let active = active_repos(&repos_dir).expect("active_repos");
        assert_eq!(active.len(), 1);

        set_active(&repos_dir, &repo_path, false).expect("deactivate");
        let active = active_repos(&repos_dir).expect("active_repos");
        assert!(active.is_empty());
    }

    #[test]
    fn delete_removes_the_sidecar() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let repos_dir = tmp.path().join("repos");
        let repo_path = tmp.path().join("consumer");
        std::fs::create_dir_all(&repo_path).expect("mkdir");
        set_active(&repos_dir, &repo_path, true).expect("activate");

        delete_by_path(&repos_dir, &repo_path).expect("delete");
        assert!(load_by_path(&repos_dir, &repo_path).expect("load").is_none());
    }
}
