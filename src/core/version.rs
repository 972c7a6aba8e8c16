//! core::version
//!
//! Dotted version strings and the installed git's version.
//!
//! Versions are compared segment by segment as non-negative integers. A
//! missing trailing segment counts as zero, so `2.6` and `2.6.0` are equal.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Returns true iff `actual >= required`.
///
/// Segments that are not plain integers contribute their leading digits, or
/// zero if there are none. Segments too large for a `u64` compare as
/// `u64::MAX`.
///
/// # Example
///
/// ```
/// use reflens::core::version::is_version_at_least;
///
/// assert!(is_version_at_least("2.6.0", "2"));
/// assert!(is_version_at_least("2.6.10", "2.6.5"));
/// assert!(!is_version_at_least("2.5.0", "2.5.1"));
/// assert!(!is_version_at_least("2.5.2", "2.5.10"));
/// ```
pub fn is_version_at_least(actual: &str, required: &str) -> bool {
    compare_versions(actual, required) != Ordering::Less
}

/// Compare two dotted version strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    compare_segments(&segments(a), &segments(b))
}

fn compare_segments(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn segments(version: &str) -> Vec<u64> {
    version
        .trim()
        .split('.')
        .map(|segment| {
            let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                0
            } else {
                segment_value(&digits)
            }
        })
        .collect()
}

/// Value of an all-digit segment, saturating at `u64::MAX`.
fn segment_value(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// The version of the installed git binary.
///
/// Parsed from `git version` output, which vendors decorate in various
/// ways (`2.39.3 (Apple Git-145)`, `2.45.1.windows.1`). Only the leading
/// run of numeric segments is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct GitVersion {
    segments: Vec<u64>,
}

impl GitVersion {
    /// Parse the output of `git version` (or a bare version string).
    ///
    /// Returns `None` if no leading numeric segment is present.
    ///
    /// # Example
    ///
    /// ```
    /// use reflens::core::version::GitVersion;
    ///
    /// let v = GitVersion::parse("git version 2.45.1.windows.1").unwrap();
    /// assert_eq!(v.to_string(), "2.45.1");
    /// assert!(v.is_at_least("2.5.0"));
    ///
    /// assert!(GitVersion::parse("hub version unknown").is_none());
    /// ```
    pub fn parse(output: &str) -> Option<Self> {
        let text = output.trim();
        let text = text.strip_prefix("git version").unwrap_or(text).trim_start();
        let token = text.split_whitespace().next()?;

        let mut segments = Vec::new();
        for part in token.split('.') {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                break;
            }
            segments.push(segment_value(part));
        }

        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// Check this version against a required dotted version.
    pub fn is_at_least(&self, required: &str) -> bool {
        compare_segments(&self.segments, &segments(required)) != Ordering::Less
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl From<GitVersion> for String {
    fn from(version: GitVersion) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod comparison {
        use super::*;

        #[test]
        fn at_least() {
            assert!(is_version_at_least("2.6.0", "2.6.0"));
            assert!(is_version_at_least("2.6.0", "2.6"));
            assert!(is_version_at_least("2.6.0", "2"));
            assert!(is_version_at_least("2.6.10", "2.6.5"));
            assert!(is_version_at_least("2.8.1", "2.7.2"));
        }

        #[test]
        fn below() {
            assert!(!is_version_at_least("1.6.0", "2"));
            assert!(!is_version_at_least("2.5.0", "2.6"));
            assert!(!is_version_at_least("2.5.0", "2.5.1"));
            assert!(!is_version_at_least("2.5.2", "2.5.10"));
        }

        #[test]
        fn shorter_actual_pads_with_zero() {
            assert!(is_version_at_least("2", "2.0.0"));
            assert!(!is_version_at_least("2", "2.0.1"));
        }

        #[test]
        fn numeric_not_lexical() {
            assert_eq!(compare_versions("2.10", "2.9"), Ordering::Greater);
        }

        #[test]
        fn junk_segments_count_as_leading_digits() {
            assert_eq!(compare_versions("2.5rc1", "2.5"), Ordering::Equal);
            assert_eq!(compare_versions("x", "0"), Ordering::Equal);
        }

        #[test]
        fn oversized_segment_saturates() {
            assert!(is_version_at_least("2.99999999999999999999", "2.1"));
            assert!(is_version_at_least("2.99999999999999999999", "2.18446744073709551615"));
            assert!(!is_version_at_least("2.1", "2.99999999999999999999"));
        }
    }

    mod git_version {
        use super::*;

        #[test]
        fn plain() {
            let v = GitVersion::parse("git version 2.43.0\n").unwrap();
            assert_eq!(v.to_string(), "2.43.0");
        }

        #[test]
        fn apple_suffix() {
            let v = GitVersion::parse("git version 2.39.3 (Apple Git-145)").unwrap();
            assert_eq!(v.to_string(), "2.39.3");
        }

        #[test]
        fn windows_suffix() {
            let v = GitVersion::parse("git version 2.45.1.windows.1").unwrap();
            assert_eq!(v.to_string(), "2.45.1");
        }

        #[test]
        fn bare_version() {
            let v = GitVersion::parse("1.9.5").unwrap();
            assert!(!v.is_at_least("2.5.0"));
        }

        #[test]
        fn unparsable() {
            assert!(GitVersion::parse("").is_none());
            assert!(GitVersion::parse("git version").is_none());
            assert!(GitVersion::parse("git version abc").is_none());
        }

        #[test]
        fn gate() {
            let v = GitVersion::parse("git version 2.5.0").unwrap();
            assert!(v.is_at_least("2.5.0"));
            assert!(v.is_at_least("2.5"));
            assert!(!v.is_at_least("2.5.1"));
        }
    }
}
