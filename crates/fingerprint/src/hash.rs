//! Content hashing with a mtime/size fast path.
//!
//! The hash is meant to answer one question cheaply: "did the bytes npm
//! would publish for this package change since the last time we looked?"
//! When a previous [`FileStat`] list is available and every entry still
//! matches on disk, the cached hash is returned without reading a single
//! file body.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{FingerprintError, FingerprintResult};
use crate::selector::ignore_file_contents;

/// Bumped whenever the hash construction changes, so records computed under
/// an older scheme never compare equal to a newer one.
pub const FINGERPRINT_FORMAT_VERSION: &str = "pkglab-fingerprint-v1";

/// `(path, mtimeMs, size)` tuple used as the cheap pre-hash gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// Path relative to the package root.
    pub path: PathBuf,
    /// Modification time in milliseconds since the epoch.
    pub mtime_ms: u128,
    /// File size in bytes.
    pub size: u64,
}

/// The outcome of fingerprinting one package: its content hash and the
/// per-file stats needed to fast-path the next run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Hex-encoded SHA-256 digest.
    pub hash: String,
    /// Stats for every file that went into the hash, for the fast path.
    pub file_stats: Vec<FileStat>,
}

fn stat(dir: &Path, path: &Path) -> FingerprintResult<FileStat> {
    let metadata = std::fs::metadata(path).map_err(|e| FingerprintError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mtime_ms = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_millis());
    let relative = path.strip_prefix(dir).unwrap_or(path).to_path_buf();
    Ok(FileStat { path: relative, mtime_ms, size: metadata.len() })
}

fn stats_unchanged(dir: &Path, files: &[PathBuf], previous: &[FileStat]) -> bool {
    if previous.len() != files.len() {
        return false;
    }
    let collected: FingerprintResult<Vec<FileStat>> = files.iter().map(|f| stat(dir, f)).collect();
    let mut current = match collected {
        Ok(stats) => stats,
        Err(_) => return false,
    };
    current.sort_by(|a, b| a.path.cmp(&b.path));
    let mut expected = previous.to_vec();
    expected.sort_by(|a, b| a.path.cmp(&b.path));
    current == expected
}

/// Computes a package's content fingerprint from its selected file list.
///
/// When `previous` is given and every file's `(path, mtime, size)` still
/// matches, its hash is returned unread. Otherwise every file's contents
/// are hashed in sorted-path order along with any `.npmignore`/`.gitignore`
/// content, seeded with [`FINGERPRINT_FORMAT_VERSION`].
///
/// # Errors
/// Returns [`FingerprintError::Io`] if a selected file cannot be read or
/// stat'd.
pub fn fingerprint(dir: &Path, files: &[PathBuf], previous: Option<&Fingerprint>) -> FingerprintResult<Fingerprint> {
    if let Some(previous) = previous {
        if stats_unchanged(dir, files, &previous.file_stats) {
            return Ok(previous.clone());
        }
    }

    let mut sorted: Vec<PathBuf> = files.to_vec();
    sorted.sort();

    let mut hasher = Sha256::new();
    hasher.update(FINGERPRINT_FORMAT_VERSION.as_bytes());
    hasher.update(b"\0");

    let mut file_stats = Vec::with_capacity(sorted.len());
    for path in &sorted {
        let contents = std::fs::read(path)
            .map_err(|e| FingerprintError::Io { path: path.clone(), message: e.to_string() })?;
        let relative = path.strip_prefix(dir).unwrap_or(path);
        hasher.update(&contents);
        hasher.update(b"\0");
        hasher.update(relative.to_string_lossy().as_bytes());
        hasher.update(b"\0");
        file_stats.push(stat(dir, path)?);
    }

    if let Some(ignore_contents) = ignore_file_contents(dir) {
        hasher.update(ignore_contents.as_bytes());
    }

    let hash = format!("{:x}", hasher.finalize());
    Ok(Fingerprint { hash, file_stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn identical_contents_produce_identical_hashes() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("a.txt");
        fs::write(&file, "hello").expect("write");

        let a = fingerprint(tmp.path(), &[file.clone()], None).expect("fingerprint");
        let b = fingerprint(tmp.path(), &[file], None).expect("fingerprint");
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn changed_contents_change_the_hash() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("a.txt");
        fs::write(&file, "hello").expect("write");
        let before = fingerprint(tmp.path(), &[file.clone()], None).expect("fingerprint");

        fs::write(&file, "goodbye").expect("write");
        let after = fingerprint(tmp.path(), &[file], None).expect("fingerprint");
        assert_ne!(before.hash, after.hash);
    }

    #[test]
    fn fast_path_skips_reading_when_stats_match() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("a.txt");
        fs::write(&file, "hello").expect("write");

        let first = fingerprint(tmp.path(), &[file.clone()], None).expect("fingerprint");
        // Mutate the file on disk without touching stats tracked by `first`,
        // by restoring identical bytes: the fast path still short-circuits
        // on unchanged (path, mtime, size) and returns the cached hash.
        let second = fingerprint(tmp.path(), &[file], Some(&first)).expect("fingerprint");
        assert_eq!(first.hash, second.hash);
    }
}
