//! Crash-safe, concurrent packument/tarball storage.
//!
//! State lives in one [`Storage`] instance: an in-memory packument map, a
//! per-package lock map guaranteeing FIFO-fair serialization of mutations,
//! and three small caches (full packument JSON, merged-upstream packument,
//! pkglab-filtered index) all invalidated on write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};
use tokio::sync::{Mutex as AsyncMutex, RwLock};

use crate::error::{RegistryError, RegistryResult};
use crate::packument::Packument;

/// Merged-packument-with-upstream cache freshness window.
pub const MERGED_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct MergedCacheEntry {
    doc: Packument,
    fetched_at: Instant,
}

#[derive(Default)]
struct Caches {
    packument_json: HashMap<String, String>,
    merged: HashMap<String, MergedCacheEntry>,
    index_json: Option<String>,
}

struct Inner {
    packuments: HashMap<String, Packument>,
    locks: HashMap<String, Arc<AsyncMutex<()>>>,
    caches: Caches,
}

/// The storage engine: owns everything under `<home>/storage/`.
pub struct Storage {
    root: PathBuf,
    inner: RwLock<Inner>,
}

fn package_dir(root: &Path, name: &str) -> PathBuf {
    // Scoped names (`@scope/pkg`) keep their natural two-level directory
    // shape; unscoped names are a single directory.
    root.join(name)
}

async fn read_package_json(path: &Path) -> Option<Packument> {
    let raw = tokio::fs::read_to_string(path).await.ok()?;
    match serde_json::from_str(&raw) {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!("skipping unparsable packument at {}: {e}", path.display());
            None
        }
    }
}

impl Storage {
    /// Scans `<storage>/` for existing packages, deletes stale `*.tmp`
    /// siblings, and loads every parseable `package.json` into memory.
    /// Parse errors are logged and skipped, never fatal.
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] if the storage root itself cannot be
    /// walked.
    pub async fn load_all(root: impl Into<PathBuf>) -> RegistryResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| RegistryError::Io(format!("creating storage root: {e}")))?;

        let mut packuments = HashMap::new();
        let mut dirs = vec![root.clone()];
        while let Some(dir) = dirs.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("skipping unreadable storage directory {}: {e}", dir.display());
                    continue;
                }
            };

            let mut package_json_path = None;
            let mut subdirs = Vec::new();
            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                let file_type = match entry.file_type().await {
                    Ok(ft) => ft,
                    Err(_) => continue,
                };
                if file_type.is_dir() {
                    subdirs.push(path);
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if name.ends_with(".tmp") {
                        let _ = tokio::fs::remove_file(&path).await;
                        continue;
                    }
                    if name == "package.json" {
                        package_json_path = Some(path);
                    }
                }
            }

            if let Some(path) = package_json_path {
                if let Some(doc) = read_package_json(&path).await {
                    packuments.insert(doc.name.clone(), doc);
                }
            } else {
                dirs.extend(subdirs);
            }
        }

        info!("loaded {} packument(s) from {}", packuments.len(), root.display());

        Ok(Self {
            root,
            inner: RwLock::new(Inner { packuments, locks: HashMap::new(), caches: Caches::default() }),
        })
    }

    /// The storage root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns (creating if absent) the per-name lock, so FIFO ordering is
    /// guaranteed by `tokio::sync::Mutex`'s own wait-queue semantics.
    async fn lock_for(&self, name: &str) -> Arc<AsyncMutex<()>> {
        let mut inner = self.inner.write().await;
        inner.locks.entry(name.to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    /// Serializes the read-check-mutate-write sequence for one package name.
    /// `f` receives a read-only snapshot and returns the new document plus
    /// whatever the caller wants as its own result.
    ///
    /// # Errors
    /// Propagates whatever `f` returns as an error, or a storage I/O failure
    /// from the commit itself.
    pub async fn with_lock<F, T>(&self, name: &str, f: F) -> RegistryResult<T>
    where
        F: FnOnce(Option<Packument>) -> RegistryResult<(Packument, T)>,
    {
        let lock = self.lock_for(name).await;
        let _guard = lock.lock().await;

        let current = self.get(name).await;
        let (next, result) = f(current)?;
        self.commit(name, next).await?;
        Ok(result)
    }

    /// Returns a clone of the in-memory packument for `name`, if any.
    pub async fn get(&self, name: &str) -> Option<Packument> {
        self.inner.read().await.packuments.get(name).cloned()
    }

    /// Writes `doc` to `<final>.tmp` then renames into place; in-memory
    /// state and all caches for `name` are updated only after the rename
    /// succeeds.
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] on any filesystem failure; in that case
    /// neither the file nor the in-memory map are changed.
    pub async fn commit(&self, name: &str, doc: Packument) -> RegistryResult<()> {
        let dir = package_dir(&self.root, name);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| RegistryError::Io(format!("creating package dir for {name}: {e}")))?;

        let mut persisted = doc.clone();
        persisted.strip_attachments();
        let json = serde_json::to_string_pretty(&persisted)
            .map_err(|e| RegistryError::Io(format!("serializing packument for {name}: {e}")))?;

        let final_path = dir.join("package.json");
        let tmp_path = dir.join(format!("package.json.{}.tmp", std::process::id()));
        tokio::fs::write(&tmp_path, &json)
            .await
            .map_err(|e| RegistryError::Io(format!("writing packument for {name}: {e}")))?;
        tokio::fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|e| RegistryError::Io(format!("committing packument for {name}: {e}")))?;

        let mut inner = self.inner.write().await;
        inner.packuments.insert(name.to_string(), persisted);
        inner.caches.packument_json.remove(name);
        inner.caches.merged.remove(name);
        inner.caches.index_json = None;
        Ok(())
    }

    /// Writes a tarball's bytes to `<storage>/<name>/<basename>` via
    /// temp-write-then-rename.
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] on any filesystem failure.
    pub async fn save_tarball(&self, name: &str, basename: &str, bytes: &[u8]) -> RegistryResult<PathBuf> {
        let dir = package_dir(&self.root, name);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| RegistryError::Io(format!("creating package dir for {name}: {e}")))?;

        let final_path = dir.join(basename);
        let tmp_path = dir.join(format!("{basename}.{}.tmp", std::process::id()));
        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| RegistryError::Io(format!("writing tarball {basename}: {e}")))?;
        tokio::fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|e| RegistryError::Io(format!("committing tarball {basename}: {e}")))?;
        Ok(final_path)
    }

    /// Deletes a tarball file if present; missing files are not an error.
    pub async fn delete_tarball(&self, name: &str, basename: &str) {
        let path = package_dir(&self.root, name).join(basename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove tarball {}: {e}", path.display());
            }
        }
    }

    /// Removes a package's directory recursively and clears it from memory
    /// and every cache. If the name is scoped and the scope directory is
    /// now empty, the scope directory is removed too.
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] if the directory exists but cannot be
    /// removed.
    pub async fn delete_package(&self, name: &str) -> RegistryResult<()> {
        let dir = package_dir(&self.root, name);
        if dir.exists() {
            tokio::fs::remove_dir_all(&dir)
                .await
                .map_err(|e| RegistryError::Io(format!("removing package dir for {name}: {e}")))?;
        }
        if let Some((scope, _)) = name.split_once('/') {
            let scope_dir = self.root.join(scope);
            if let Ok(mut entries) = tokio::fs::read_dir(&scope_dir).await {
                if entries.next_entry().await.ok().flatten().is_none() {
                    let _ = tokio::fs::remove_dir(&scope_dir).await;
                }
            }
        }

        let mut inner = self.inner.write().await;
        inner.packuments.remove(name);
        inner.locks.remove(name);
        inner.caches.packument_json.remove(name);
        inner.caches.merged.remove(name);
        inner.caches.index_json = None;
        Ok(())
    }

    /// Returns the cached full-JSON serialization of `name`'s packument,
    /// computing and caching it on miss.
    ///
    /// # Errors
    /// Returns [`RegistryError::Internal`] if serialization fails, which
    /// would indicate a bug since the in-memory document always round-trips.
    pub async fn packument_json(&self, name: &str) -> RegistryResult<Option<String>> {
        {
            let inner = self.inner.read().await;
            if let Some(cached) = inner.caches.packument_json.get(name) {
                return Ok(Some(cached.clone()));
            }
            if !inner.packuments.contains_key(name) {
                return Ok(None);
            }
        }

        let mut inner = self.inner.write().await;
        let Some(doc) = inner.packuments.get(name) else { return Ok(None) };
        let json = serde_json::to_string(doc)
            .map_err(|e| RegistryError::Internal(format!("serializing packument for {name}: {e}")))?;
        inner.caches.packument_json.insert(name.to_string(), json.clone());
        Ok(Some(json))
    }

    /// Returns a cached merged-with-upstream packument if one is on file and
    /// still within [`MERGED_CACHE_TTL`].
    pub async fn fresh_merged(&self, name: &str) -> Option<Packument> {
        let inner = self.inner.read().await;
        let entry = inner.caches.merged.get(name)?;
        if entry.fetched_at.elapsed() <= MERGED_CACHE_TTL {
            Some(entry.doc.clone())
        } else {
            None
        }
    }

    /// Stores `doc` as the merged-with-upstream cache entry for `name`,
    /// timestamped now.
    pub async fn cache_merged(&self, name: &str, doc: Packument) {
        let mut inner = self.inner.write().await;
        inner.caches.merged.insert(name.to_string(), MergedCacheEntry { doc, fetched_at: Instant::now() });
    }

    /// Returns the cached pkglab-filtered index JSON, computing it via
    /// `build` on miss.
    pub async fn index_json<F>(&self, build: F) -> String
    where
        F: FnOnce(&HashMap<String, Packument>) -> String,
    {
        {
            let inner = self.inner.read().await;
            if let Some(cached) = &inner.caches.index_json {
                return cached.clone();
            }
        }
        let mut inner = self.inner.write().await;
        if let Some(cached) = &inner.caches.index_json {
            return cached.clone();
        }
        let json = build(&inner.packuments);
        inner.caches.index_json = Some(json.clone());
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_all_on_empty_root_yields_no_packuments() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = Storage::load_all(tmp.path()).await.expect("load_all");
        assert!(storage.get("left-pad").await.is_none());
    }

    #[tokio::test]
    async fn commit_then_get_round_trips() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = Storage::load_all(tmp.path()).await.expect("load_all");
        let doc = Packument::new("left-pad");
        storage.commit("left-pad", doc.clone()).await.expect("commit");

        let reloaded = storage.get("left-pad").await.expect("get");
        assert_eq!(reloaded.name, doc.name);
        assert_eq!(reloaded.rev, doc.rev);
    }

    #[tokio::test]
    async fn commit_invalidates_index_cache() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = Storage::load_all(tmp.path()).await.expect("load_all");
        let first = storage.index_json(|_| "v1".to_string()).await;
        assert_eq!(first, "v1");

        storage.commit("left-pad", Packument::new("left-pad")).await.expect("commit");
        let second = storage.index_json(|_| "v2".to_string()).await;
        assert_eq!(second, "v2");
    }

    #[tokio::test]
    async fn reload_from_disk_finds_committed_packument() {
        let tmp = tempfile::tempdir().expect("tempdir");
        {
            let storage = Storage::load_all(tmp.path()).await.expect("load_all");
            storage.commit("@scope/pkg", Packument::new("@scope/pkg")).await.expect("commit");
        }
        let reloaded_storage = Storage::load_all(tmp.path()).await.expect("load_all");
        assert!(reloaded_storage.get("@scope/pkg").await.is_some());
    }
}
