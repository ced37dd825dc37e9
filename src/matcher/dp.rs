//! Dynamic-programming wildcard matcher.
//!
//! Matches a URL against a compiled pattern (see `compile::emit_dp`) with
//! a boolean table over URL and pattern prefixes. The table's termination
//! cell spans the full URL and full pattern, so matching is implicitly
//! whole-string. Supports exactly two wildcard tokens: `*` (path-crossing)
//! and `|` (segment-scoped, never consumes the delimiter).

use crate::matcher::compile::{PATH_DELIMITER, SEGMENT_WILDCARD, WILDCARD};

/// Whole-string match of `url` against a DP-compiled pattern.
///
/// `T[i][j]` is true when the first `i` URL characters match the first `j`
/// pattern characters:
/// - equal characters consume one of each;
/// - `*` consumes one URL character or matches zero-width;
/// - `|` matches zero-width or consumes one non-delimiter character.
pub fn dp_match(url: &str, pattern: &str) -> bool {
    // Boundary cases, defined explicitly rather than via the table.
    match (url.is_empty(), pattern.is_empty()) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        (false, false) => {}
    }

    let url: Vec<char> = url.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (m, n) = (url.len(), pattern.len());

    let mut table = vec![vec![false; n + 1]; m + 1];
    table[0][0] = true;
    // A single leading wildcard can match the empty prefix. Collapse
    // guarantees no two adjacent wildcards, so no longer all-wildcard
    // prefix can occur at the head.
    if pattern[0] == WILDCARD || pattern[0] == SEGMENT_WILDCARD {
        table[0][1] = true;
    }

    for i in 1..=m {
        for j in 1..=n {
            let (u, p) = (url[i - 1], pattern[j - 1]);
            table[i][j] = if u == p {
                table[i - 1][j - 1]
            } else if p == WILDCARD {
                table[i - 1][j] || table[i][j - 1]
            } else if p == SEGMENT_WILDCARD {
                table[i][j - 1] || (u != PATH_DELIMITER && table[i - 1][j])
            } else {
                false
            };
        }
    }

    table[m][n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::compile::compile_dp_pattern;

    fn matches(url: &str, raw_pattern: &str) -> bool {
        dp_match(url, &compile_dp_pattern(raw_pattern))
    }

    #[test]
    fn test_boundary_cases() {
        assert!(dp_match("", ""));
        assert!(!dp_match("", "*"));
        assert!(!dp_match("a", ""));
    }

    #[test]
    fn test_literal_match() {
        assert!(matches("host.com/a.jpg", "host.com/a.jpg"));
        assert!(!matches("host.com/a.jpg", "host.com/b.jpg"));
        // Whole-string: no substring matching.
        assert!(!matches("xhost.com", "host.com"));
        assert!(!matches("host.comx", "host.com"));
    }

    #[test]
    fn test_segment_wildcard_does_not_cross_delimiter() {
        assert!(matches("a.jpg", "*.jpg"));
        assert!(!matches("a/b.jpg", "*.jpg"));
    }

    #[test]
    fn test_path_wildcard_crosses_delimiter() {
        assert!(matches("host.com/a.jpg", "host.com/*.jpg"));
        assert!(matches("host.com/a/b.jpg", "host.com/*.jpg"));
    }

    #[test]
    fn test_wildcard_zero_width() {
        assert!(matches("host.com/", "host.com/*"));
        assert!(matches(".jpg", "*.jpg"));
    }

    #[test]
    fn test_mixed_scopes() {
        assert!(matches("img.host.com/a/b/c.png", "*.host.com/*.png"));
        // The leading wildcard may span dots but never the delimiter.
        assert!(matches("a.b.host.com/x", "*.host.com/*"));
        assert!(!matches("a/b.host.com/x", "*.host.com/*"));
    }

    #[test]
    fn test_collapsed_runs_behave_as_one_wildcard() {
        assert!(matches("abc.jpg", "***.jpg"));
        assert!(!matches("a/b.jpg", "***.jpg"));
    }
}
