//! Retention pruning: for each package, group marker versions by tag, keep
//! the newest `prune_keep` per group, and unpublish whatever's left over —
//! unless some active consumer still has it as `current`.

use std::collections::BTreeMap;

use serde::Deserialize;
use sublime_publish_tools::unpublish_version;
use sublime_version_tools::extract_timestamp;

use crate::error::{SyncError, SyncResult};
use crate::repo_state::RepoState;

#[derive(Debug, Deserialize)]
struct IndexEntry {
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IndexDocument {
    packages: BTreeMap<String, IndexEntry>,
}

/// One version the pruner decided to remove, and the outcome of trying.
#[derive(Debug, Clone)]
pub struct PrunedVersion {
    /// Package name.
    pub name: String,
    /// Version that was unpublished.
    pub version: String,
}

/// Result of a prune run across the whole registry.
#[derive(Debug, Clone, Default)]
pub struct PruneReport {
    /// Versions successfully unpublished.
    pub pruned: Vec<PrunedVersion>,
    /// Versions the pruner tried to unpublish but the registry rejected.
    pub failures: Vec<(PrunedVersion, String)>,
    /// Versions that were prunable by age but kept because an active
    /// consumer still references them as `current`.
    pub kept_in_use: Vec<PrunedVersion>,
}

fn referenced_versions(repos: &[RepoState]) -> std::collections::HashSet<(String, String)> {
    repos
        .iter()
        .filter(|r| r.active)
        .flat_map(|r| r.packages.iter().map(|(name, link)| (name.clone(), link.current.clone())))
        .collect()
}

/// Groups `versions` (all already known to match the marker grammar) by tag,
/// sorts each group newest-first by embedded timestamp, and returns the
/// groups.
fn group_by_tag(versions: &[String], marker: &str) -> BTreeMap<Option<String>, Vec<String>> {
    let mut groups: BTreeMap<Option<String>, Vec<(u64, String)>> = BTreeMap::new();
    for version in versions {
        let tag = sublime_version_tools::extract_tag(version, marker);
        let Some(ts) = extract_timestamp(version, marker) else { continue };
        groups.entry(tag).or_default().push((ts, version.clone()));
    }

    groups
        .into_iter()
        .map(|(tag, mut entries)| {
            entries.sort_by(|a, b| b.0.cmp(&a.0));
            (tag, entries.into_iter().map(|(_, v)| v).collect())
        })
        .collect()
}

/// Fetches the pkglab-filtered index from `registry_url` and determines
/// which versions are prunable by age alone — i.e. past `prune_keep` within
/// their `(package, tag)` group — without regard to whether a consumer still
/// references them and without unpublishing anything yet. Callers that need
/// the in-use filter applied should cross-reference the result against
/// [`referenced_versions`] themselves, or call [`prune`] directly.
///
/// # Errors
/// Returns [`SyncError::Registry`] if the index can't be fetched or parsed.
pub async fn plan_prune(
    client: &reqwest::Client,
    registry_url: &str,
    marker: &str,
    prune_keep: usize,
) -> SyncResult<Vec<PrunedVersion>> {
    let url = format!("{}/-/pkglab/index", registry_url.trim_end_matches('/'));
    let response = client.get(&url).send().await.map_err(|e| SyncError::Registry(e.to_string()))?;
    let document: IndexDocument = response.json().await.map_err(|e| SyncError::Registry(e.to_string()))?;

    let mut candidates = Vec::new();
    for (name, entry) in document.packages {
        let groups = group_by_tag(&entry.versions, marker);
        for (_, versions_newest_first) in groups {
            for version in versions_newest_first.into_iter().skip(prune_keep) {
                candidates.push(PrunedVersion { name: name.clone(), version });
            }
        }
    }

    Ok(candidates)
}

/// Runs a full prune cycle: fetches the index, computes prunable versions
/// past `prune_keep` per `(package, tag)` group, skips anything still
/// referenced by an active consumer's `current` link, and unpublishes the
/// rest via the registry's unpublish-of-version path.
///
/// # Errors
/// Returns [`SyncError::Registry`] if the index can't be fetched in the
/// first place; per-version unpublish failures are collected into the
/// returned report rather than aborting the run.
pub async fn prune(
    client: &reqwest::Client,
    registry_url: &str,
    marker: &str,
    prune_keep: usize,
    repos: &[RepoState],
) -> SyncResult<PruneReport> {
    let in_use = referenced_versions(repos);
    let candidates = plan_prune(client, registry_url, marker, prune_keep).await?;

    let mut report = PruneReport::default();
    for candidate in candidates {
        if in_use.contains(&(candidate.name.clone(), candidate.version.clone())) {
            report.kept_in_use.push(candidate);
            continue;
        }
        match unpublish_version(client, registry_url, &candidate.name, &candidate.version).await {
            Ok(()) => report.pruned.push(candidate),
            Err(e) => report.failures.push((candidate, e.to_string())),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_by_tag_sorts_newest_first() {
        let versions = vec![
            "0.0.0-pkglab.100".to_string(),
            "0.0.0-pkglab.300".to_string(),
            "0.0.0-pkglab.200".to_string(),
        ];
        let groups = group_by_tag(&versions, "pkglab");
        let default_group = groups.get(&None).expect("untagged group present");
        assert_eq!(default_group, &vec!["0.0.0-pkglab.300".to_string(), "0.0.0-pkglab.200".to_string(), "0.0.0-pkglab.100".to_string()]);
    }

    #[test]
    fn group_by_tag_separates_tags() {
        let versions = vec!["0.0.0-pkglab-canary.100".to_string(), "0.0.0-pkglab.200".to_string()];
        let groups = group_by_tag(&versions, "pkglab");
        assert_eq!(groups.len(), 2);
        assert!(groups.contains_key(&Some("canary".to_string())));
        assert!(groups.contains_key(&None));
    }
}
