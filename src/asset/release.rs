use std::cmp::Ordering;

use crate::provider::Release;

/// The most recently published non-prerelease release.
///
/// Releases without a publish timestamp rank below every dated one; among
/// those the tag decides.
pub fn newest_stable(releases: &[Release]) -> Option<&Release> {
    releases
        .iter()
        .filter(|r| !r.prerelease)
        .max_by(|a, b| compare_releases(a, b))
}

fn compare_releases(a: &Release, b: &Release) -> Ordering {
    match (&a.published_at, &b.published_at) {
        (Some(at_a), Some(at_b)) => at_a.cmp(at_b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.tag.cmp(&b.tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn make_release(tag: &str, published_at: Option<&str>, prerelease: bool) -> Release {
        Release {
            tag: tag.to_string(),
            published_at: published_at
                .map(|s| s.parse::<DateTime<Utc>>().expect("valid timestamp")),
            prerelease,
            ..Default::default()
        }
    }

    #[test]
    fn test_newest_by_publish_time_not_listing_order() {
        let releases = vec![
            make_release("v7.2.17", Some("2023-11-16T18:00:00Z"), false),
            make_release("v7.4.0", Some("2023-11-16T20:53:12Z"), false),
            make_release("v7.3.9", Some("2023-10-26T00:00:00Z"), false),
        ];
        assert_eq!(newest_stable(&releases).unwrap().tag, "v7.4.0");
    }

    #[test]
    fn test_prereleases_are_ignored_even_when_newer() {
        let releases = vec![
            make_release("v7.5.0-preview.1", Some("2024-01-01T00:00:00Z"), true),
            make_release("v7.4.0", Some("2023-11-16T20:53:12Z"), false),
        ];
        assert_eq!(newest_stable(&releases).unwrap().tag, "v7.4.0");
    }

    #[test]
    fn test_undated_release_ranks_last() {
        let releases = vec![
            make_release("v9.9.9", None, false),
            make_release("v7.4.0", Some("2023-11-16T20:53:12Z"), false),
        ];
        assert_eq!(newest_stable(&releases).unwrap().tag, "v7.4.0");
    }

    #[test]
    fn test_no_stable_release() {
        let releases = vec![make_release("v7.5.0-rc.1", Some("2024-01-01T00:00:00Z"), true)];
        assert!(newest_stable(&releases).is_none());
        assert!(newest_stable(&[]).is_none());
    }
}
