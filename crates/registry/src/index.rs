//! The pkglab-filtered index: a trimmed view of storage containing only
//! pkglab-issued marker versions, used by the consumer sync engine to see
//! "what's locally publishable" without walking every packument's full
//! version history.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::packument::Packument;

fn marker_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| {
        Regex::new(r"^0\.0\.0-[A-Za-z0-9][A-Za-z0-9-]*\.\d+$").expect("static pattern is valid")
    })
}

/// Whether `version` matches the pkglab marker-version grammar, regardless
/// of which marker issued it (unlike
/// `sublime_version_tools::is_marker`, which checks one specific marker).
#[must_use]
pub fn is_pkglab_version(version: &str) -> bool {
    marker_version_pattern().is_match(version)
}

#[derive(Debug, Serialize)]
struct IndexEntry<'a> {
    rev: &'a str,
    #[serde(rename = "dist-tags")]
    dist_tags: BTreeMap<&'a str, &'a str>,
    versions: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct IndexDocument<'a> {
    packages: BTreeMap<&'a str, IndexEntry<'a>>,
}

/// Builds the pkglab-filtered index document as a JSON string.
///
/// # Panics
/// Never: the index is built from in-memory documents that already
/// round-tripped through JSON once.
#[must_use]
pub fn build_index(packuments: &HashMap<String, Packument>) -> String {
    let mut packages = BTreeMap::new();

    for doc in packuments.values() {
        let versions: Vec<&str> = doc
            .versions
            .keys()
            .map(String::as_str)
            .filter(|v| is_pkglab_version(v))
            .collect();
        if versions.is_empty() {
            continue;
        }

        let dist_tags: BTreeMap<&str, &str> = doc
            .dist_tags
            .iter()
            .filter(|(_, v)| versions.contains(&v.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        packages.insert(doc.name.as_str(), IndexEntry { rev: &doc.rev, dist_tags, versions });
    }

    serde_json::to_string(&IndexDocument { packages }).unwrap_or_else(|_| "{\"packages\":{}}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_marker_versions_regardless_of_marker_value() {
        assert!(is_pkglab_version("0.0.0-a1b2c3.1700000000000"));
        assert!(is_pkglab_version("0.0.0-a1b2c3-canary.1700000000000"));
        assert!(!is_pkglab_version("1.2.3"));
        assert!(!is_pkglab_version("0.0.0-nope"));
    }

    #[test]
    fn packages_with_no_marker_versions_are_elided() {
        let mut packuments = HashMap::new();
        let mut doc = Packument::new("left-pad");
        doc.versions.insert(
            "1.0.0".to_string(),
            crate::packument::VersionMeta {
                manifest: serde_json::json!({}),
                dist: crate::packument::Dist {
                    tarball: "http://x/left-pad-1.0.0.tgz".to_string(),
                    integrity: None,
                    shasum: None,
                },
            },
        );
        packuments.insert(doc.name.clone(), doc);

        let index = build_index(&packuments);
        assert_eq!(index, "{\"packages\":{}}");
    }
}
