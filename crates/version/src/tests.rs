use rstest::rstest;

use crate::codec::{extract_tag, extract_timestamp, is_marker, sanitize_tag, VersionIssuer};
use crate::error::VersionError;

#[rstest]
#[case("feature/foo", "feature-foo")]
#[case("feature//foo", "feature-foo")]
#[case("weird!!chars??", "weirdchars")]
#[case("--leading-and-trailing--", "leading-and-trailing")]
#[case("a---b", "a-b")]
fn sanitize_tag_normalizes(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize_tag(input).expect("sanitizes"), expected);
}

#[test]
fn sanitize_tag_truncates_at_fifty_chars() {
    let input = "a".repeat(80);
    let sanitized = sanitize_tag(&input).expect("sanitizes");
    assert_eq!(sanitized.len(), 50);
}

#[test]
fn sanitize_tag_fails_on_all_invalid_chars() {
    let err = sanitize_tag("!!!///???").unwrap_err();
    assert!(matches!(err, VersionError::EmptyTag { .. }));
}

#[test]
fn synthesize_without_tag() {
    let issuer = VersionIssuer::new("pkglab");
    let version = issuer.synthesize(1_700_000_000_000, None).expect("synthesizes");
    assert_eq!(version, "0.0.0-pkglab.1700000000000");
}

#[test]
fn synthesize_with_tag() {
    let issuer = VersionIssuer::new("pkglab");
    let version = issuer.synthesize(1_700_000_000_000, Some("my-feature")).expect("synthesizes");
    assert_eq!(version, "0.0.0-pkglab-my-feature.1700000000000");
}

#[test]
fn synthesize_sanitizes_the_tag() {
    let issuer = VersionIssuer::new("pkglab");
    let version = issuer.synthesize(1_700_000_000_000, Some("feature/foo")).expect("synthesizes");
    assert_eq!(version, "0.0.0-pkglab-feature-foo.1700000000000");
}

#[test]
fn synthesize_rejects_tag_that_sanitizes_to_empty() {
    let issuer = VersionIssuer::new("pkglab");
    let err = issuer.synthesize(1_700_000_000_000, Some("///")).unwrap_err();
    assert!(matches!(err, VersionError::EmptyTag { .. }));
}

#[test]
fn synthesize_is_monotone_even_when_clock_regresses() {
    let issuer = VersionIssuer::new("pkglab");
    let first = issuer.synthesize(1_700_000_000_000, None).expect("synthesizes");
    let second = issuer.synthesize(1_700_000_000_000, None).expect("synthesizes");
    let third = issuer.synthesize(1_000_000_000_000, None).expect("synthesizes");

    let ts = |v: &str| extract_timestamp(v, "pkglab").expect("has timestamp");
    assert!(ts(&second) > ts(&first));
    assert!(ts(&third) > ts(&second));
}

#[test]
fn is_marker_matches_own_versions_and_rejects_others() {
    let issuer = VersionIssuer::new("pkglab");
    let version = issuer.synthesize(1_700_000_000_000, Some("canary")).expect("synthesizes");
    assert!(is_marker(&version, "pkglab"));
    assert!(!is_marker(&version, "otherlab"));
    assert!(!is_marker("1.2.3", "pkglab"));
    assert!(!is_marker("0.0.0-pkglab2.123", "pkglab"));
}

#[test]
fn extract_tag_roundtrips() {
    let issuer = VersionIssuer::new("pkglab");
    let with_tag = issuer.synthesize(1_700_000_000_000, Some("canary")).expect("synthesizes");
    let without_tag = issuer.synthesize(1_700_000_000_001, None).expect("synthesizes");

    assert_eq!(extract_tag(&with_tag, "pkglab").as_deref(), Some("canary"));
    assert_eq!(extract_tag(&without_tag, "pkglab"), None);
}

#[test]
fn extract_timestamp_returns_none_for_non_marker_versions() {
    assert_eq!(extract_timestamp("1.2.3", "pkglab"), None);
}
