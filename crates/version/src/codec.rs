//! Marker-version synthesis and parsing.
//!
//! Grammar: `0.0.0-<marker>` then optional `-<sanitized-tag>` then
//! `.<decimal-ms>`. Only [`VersionIssuer::synthesize`] produces these
//! strings; the free parser functions accept anything matching the grammar,
//! including versions this process never issued, since another pkglab
//! process sharing the same registry may have published them.

use std::sync::atomic::{AtomicU64, Ordering};

use regex::Regex;

use crate::error::{VersionError, VersionResult};

const MAX_TAG_LEN: usize = 50;

/// Strips `raw` down to the sanitized tag grammar: slashes become hyphens,
/// anything outside `[A-Za-z0-9-]` is dropped, repeated hyphens collapse to
/// one, boundary hyphens are trimmed, and the result is truncated to
/// [`MAX_TAG_LEN`] characters.
///
/// # Errors
/// Returns [`VersionError::EmptyTag`] if sanitizing leaves nothing.
pub fn sanitize_tag(raw: &str) -> VersionResult<String> {
    let slashes_to_hyphens = raw.replace('/', "-");
    let stripped: String =
        slashes_to_hyphens.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-').collect();

    let mut collapsed = String::with_capacity(stripped.len());
    let mut last_was_hyphen = false;
    for c in stripped.chars() {
        if c == '-' {
            if last_was_hyphen {
                continue;
            }
            last_was_hyphen = true;
        } else {
            last_was_hyphen = false;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.trim_matches('-');
    let truncated: String = trimmed.chars().take(MAX_TAG_LEN).collect();
    let sanitized = truncated.trim_matches('-').to_string();

    if sanitized.is_empty() {
        return Err(VersionError::EmptyTag { raw: raw.to_string() });
    }
    Ok(sanitized)
}

/// Issues monotonically increasing marker versions for one `marker`.
///
/// Holds the `lastIssued` counter as instance state rather than a
/// module-level global, so the lifetime of the guarantee is tied to however
/// long the owning component (publish queue, registry) keeps this issuer
/// alive.
#[derive(Debug)]
pub struct VersionIssuer {
    marker: String,
    last_issued: AtomicU64,
}

impl VersionIssuer {
    /// Creates an issuer for `marker` with no versions issued yet.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into(), last_issued: AtomicU64::new(0) }
    }

    /// The marker this issuer stamps into every synthesized version.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// `ts = max(lastIssued + 1, now_ms)`, updated atomically so concurrent
    /// callers on the same issuer never observe a repeated or decreasing
    /// timestamp.
    fn next_timestamp(&self, now_ms: u64) -> u64 {
        loop {
            let last = self.last_issued.load(Ordering::SeqCst);
            let candidate = (last + 1).max(now_ms);
            if self
                .last_issued
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return candidate;
            }
        }
    }

    /// Synthesizes `0.0.0-<marker>[-<tag>].<ts>` for the current instant
    /// `now_ms`, sanitizing `tag` first if present.
    ///
    /// # Errors
    /// Returns [`VersionError::EmptyTag`] if `tag` sanitizes to nothing, or
    /// [`VersionError::ParseFailed`] if the assembled string is somehow not
    /// valid semver (a bug, since the grammar is a semver subset).
    pub fn synthesize(&self, now_ms: u64, tag: Option<&str>) -> VersionResult<String> {
        let sanitized_tag = tag.map(sanitize_tag).transpose()?;
        let ts = self.next_timestamp(now_ms);

        let prerelease = match sanitized_tag {
            Some(tag) => format!("{}-{tag}.{ts}", self.marker),
            None => format!("{}.{ts}", self.marker),
        };
        let version = format!("0.0.0-{prerelease}");

        semver::Version::parse(&version)
            .map_err(|source| VersionError::ParseFailed { version: version.clone(), source })?;

        Ok(version)
    }
}

fn marker_pattern(marker: &str) -> Option<Regex> {
    let pattern = format!(r"^0\.0\.0-{}(?:-(?P<tag>[A-Za-z0-9-]+))?\.(?P<ts>\d+)$", regex::escape(marker));
    Regex::new(&pattern).ok()
}

/// Whether `version` matches the marker-version grammar for `marker`.
#[must_use]
pub fn is_marker(version: &str, marker: &str) -> bool {
    marker_pattern(marker).is_some_and(|re| re.is_match(version))
}

/// Extracts the `<ts>` component of a marker version, or `None` if `version`
/// doesn't match the grammar for `marker`.
#[must_use]
pub fn extract_timestamp(version: &str, marker: &str) -> Option<u64> {
    marker_pattern(marker)?.captures(version)?.name("ts")?.as_str().parse().ok()
}

/// Extracts the sanitized `<tag>` component of a marker version, or `None`
/// if `version` doesn't match the grammar for `marker` or carries no tag.
#[must_use]
pub fn extract_tag(version: &str, marker: &str) -> Option<String> {
    marker_pattern(marker)?.captures(version)?.name("tag").map(|m| m.as_str().to_string())
}
