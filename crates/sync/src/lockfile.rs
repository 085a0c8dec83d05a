//! In-place `pnpm-lock.yaml` patching: replace every occurrence of an old
//! version with a new one, keeping the file close enough to what pnpm itself
//! would write that `--frozen-lockfile` accepts it.
//!
//! String-based rather than a full YAML round-trip deliberately — pnpm's
//! lockfile format is sensitive to key ordering and block-scalar formatting
//! in ways a generic YAML writer doesn't preserve, and the fallback (a full,
//! non-frozen install) is always available if the patch doesn't take.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{SyncError, SyncResult};

const INTEGRITY_SCAN_WINDOW: usize = 40;

/// One dependency version replacement to apply across a lockfile.
#[derive(Debug, Clone)]
pub struct VersionPatch {
    /// Package name as it appears in the lockfile's package keys.
    pub name: String,
    /// Version string being replaced.
    pub old_version: String,
    /// Version string to replace it with.
    pub new_version: String,
    /// `sha512-...` integrity string for the new tarball, if known; when
    /// present, the `resolution.integrity` line within the scan window after
    /// the package's key is also replaced.
    pub new_integrity: Option<String>,
}

/// Patches `content` in place (returning the patched string) for every
/// `patches` entry: every line-level occurrence of `old_version` following
/// that package's name is replaced with `new_version`, and the nearest
/// `integrity:` line within [`INTEGRITY_SCAN_WINDOW`] lines after a matching
/// package key is replaced if a new integrity string was supplied.
///
/// Uses split/join on lines rather than regex substitution so replacement is
/// predictable and never touches partial matches inside longer tokens.
#[must_use]
pub fn patch(content: &str, patches: &[VersionPatch]) -> String {
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    for patch in patches {
        let key_needle = format!("{}@{}", patch.name, patch.old_version);
        let replacement_key = format!("{}@{}", patch.name, patch.new_version);

        for index in 0..lines.len() {
            if lines[index].contains(&key_needle) {
                lines[index] = lines[index].replace(&key_needle, &replacement_key);

                if let Some(new_integrity) = &patch.new_integrity {
                    let window_end = (index + INTEGRITY_SCAN_WINDOW).min(lines.len());
                    for scan_line in lines.iter_mut().take(window_end).skip(index) {
                        let trimmed = scan_line.trim_start();
                        if let Some(prefix_len) = trimmed.strip_prefix("integrity:").map(|_| scan_line.len() - trimmed.len()) {
                            let indent = &scan_line[..prefix_len];
                            *scan_line = format!("{indent}integrity: {new_integrity}");
                            break;
                        }
                    }
                }
            } else if lines[index].trim_start().starts_with(&format!("{}:", patch.old_version)) {
                // Bare version-only keys under a resolved block, e.g. snapshot maps.
                lines[index] = lines[index].replacen(&patch.old_version, &patch.new_version, 1);
            }
        }
    }

    let mut joined = lines.join("\n");
    if content.ends_with('\n') {
        joined.push('\n');
    }
    joined
}

/// Reads `pnpm-lock.yaml` from `repo_root`, applies `patches`, and writes the
/// result back only if at least one patch's package key was actually found
/// (an all-miss patch set likely means the lockfile structure didn't match
/// what was expected, and the caller should fall back to a full install
/// instead of writing a no-op).
///
/// Returns `Ok(true)` if the file was rewritten, `Ok(false)` if no patch
/// applied and the file was left untouched.
///
/// # Errors
/// Returns [`SyncError::LockfilePatchFailed`] if the lockfile cannot be read
/// or written.
pub fn patch_file(repo_root: &Path, patches: &[VersionPatch]) -> SyncResult<bool> {
    let path = repo_root.join("pnpm-lock.yaml");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| SyncError::LockfilePatchFailed { path: path.clone(), message: e.to_string() })?;

    let any_hit = patches.iter().any(|p| content.contains(&format!("{}@{}", p.name, p.old_version)));
    if !any_hit {
        return Ok(false);
    }

    let patched = patch(&content, patches);
    std::fs::write(&path, patched).map_err(|e| SyncError::LockfilePatchFailed { path, message: e.to_string() })?;
    Ok(true)
}

/// Computes the `sha512-<base64>`-shaped integrity string pnpm expects for a
/// package's tarball bytes — used when a patch's caller has the packed bytes
/// on hand rather than the registry's own integrity string.
#[must_use]
pub fn sha256_digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}

/// Strips `http://127.0.0.1:<port>/` and `http://localhost:<port>/` URL
/// prefixes down to a bare path, leaving whatever follows untouched. Used to
/// scrub bun's lockfile of loopback registry URLs after an install against
/// pkglab's local registry.
#[must_use]
pub fn scrub_loopback_urls(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut owned = line.to_string();
            for prefix_pattern in ["http://127.0.0.1:", "http://localhost:"] {
                if let Some(start) = owned.find(prefix_pattern) {
                    let after_host = &owned[start + prefix_pattern.len()..];
                    if let Some(slash) = after_host.find('/') {
                        let rest = after_host[slash..].to_string();
                        owned.replace_range(start..owned.len(), &rest);
                    }
                }
            }
            owned
        })
        .collect::<Vec<_>>()
        .join("\n")
        + if content.ends_with('\n') { "\n" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_replaces_package_version_and_integrity() {
        let content = "packages:\n  left-pad@1.0.0:\n    resolution: {integrity: sha512-old}\n    engines: {node: '>=8'}\n";
        let patches = vec![VersionPatch {
            name: "left-pad".to_string(),
            old_version: "1.0.0".to_string(),
            new_version: "0.0.0-pkglab.1".to_string(),
            new_integrity: Some("sha512-new".to_string()),
        }];

        let patched = patch(content, &patches);
        assert!(patched.contains("left-pad@0.0.0-pkglab.1"));
        assert!(patched.contains("integrity: sha512-new"));
        assert!(!patched.contains("1.0.0"));
    }

    #[test]
    fn patch_leaves_unrelated_lines_alone() {
        let content = "packages:\n  other-pkg@2.0.0:\n    resolution: {integrity: sha512-untouched}\n";
        let patches = vec![VersionPatch {
            name: "left-pad".to_string(),
            old_version: "1.0.0".to_string(),
            new_version: "0.0.0-pkglab.1".to_string(),
            new_integrity: None,
        }];

        let patched = patch(content, &patches);
        assert_eq!(patched, content.trim_end_matches('\n').to_string() + "\n");
    }

    #[test]
    fn scrub_loopback_urls_strips_host_and_port() {
        let content = "resolved: \"http://127.0.0.1:4873/left-pad/-/left-pad-1.0.0.tgz\"\n";
        let scrubbed = scrub_loopback_urls(content);
        assert_eq!(scrubbed, "resolved: \"/left-pad/-/left-pad-1.0.0.tgz\"\n");
    }
}
