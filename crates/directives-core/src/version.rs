//! Dotted numeric version ordering.
//!
//! NuGet version strings are compared segment by segment as integers, so
//! `1.10.0` sorts above `1.2.3`. Missing trailing segments count as zero,
//! which makes `2.1` and `2.1.0` equal.

use std::cmp::Ordering;

/// Number of versions offered by default in version completions.
pub const DEFAULT_VERSION_LIMIT: usize = 10;

/// Compares two dotted numeric versions.
///
/// The first unequal segment pair decides. A segment absent from one side
/// contributes `0`. The comparison never fails: a segment that is not a
/// non-negative integer is read as `0`.
///
/// # Examples
///
/// ```
/// use directives_core::version::compare_versions;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_versions("2.1", "2.1.0"), Ordering::Equal);
/// assert_eq!(compare_versions("1.2.3", "1.10.0"), Ordering::Less);
/// assert_eq!(compare_versions("13.0.3", "13.0.1"), Ordering::Greater);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => match l.unwrap_or(0).cmp(&r.unwrap_or(0)) {
                Ordering::Equal => {}
                decided => return decided,
            },
        }
    }
}

fn segments(version: &str) -> impl Iterator<Item = u64> + '_ {
    version
        .split('.')
        .map(|segment| segment.trim().parse().unwrap_or(0))
}

/// Returns `true` for versions carrying a pre-release label (`1.0.0-beta`).
pub fn is_prerelease(version: &str) -> bool {
    version.contains('-')
}

/// Filters a version list down to completion candidates.
///
/// Drops pre-release versions, keeps those that literally start with
/// `prefix`, sorts newest first, and keeps at most `limit` entries.
///
/// # Examples
///
/// ```
/// use directives_core::version::filter_versions;
///
/// let versions: Vec<String> = ["1.0.0", "1.0.0-beta", "1.1.0", "2.0.0"]
///     .iter()
///     .map(|v| v.to_string())
///     .collect();
///
/// assert_eq!(filter_versions(&versions, "1", 10), vec!["1.1.0", "1.0.0"]);
/// ```
pub fn filter_versions(versions: &[String], prefix: &str, limit: usize) -> Vec<String> {
    let mut matching: Vec<&String> = versions
        .iter()
        .filter(|v| !is_prerelease(v) && v.starts_with(prefix))
        .collect();

    matching.sort_by(|a, b| compare_versions(b, a));

    matching.into_iter().take(limit).cloned().collect()
}
