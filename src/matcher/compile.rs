//! Pattern compilation shared by both matching strategies.
//!
//! # Responsibilities
//! - Collapse runs of wildcards to a single wildcard
//! - Classify each wildcard as segment-scoped or path-crossing
//! - Emit the strategy-specific compiled form
//!
//! # Design Decisions
//! - A wildcard at or before the first `/` globs within one path segment
//!   (a hostname label, say) and must not cross the delimiter; a wildcard
//!   after it may span multiple segments, mirroring robots/ad-block style
//!   glob rules
//! - Compilation is re-run on every match attempt; compiled forms are
//!   ephemeral strings, never cached

/// The path delimiter that segment-scoped wildcards must not cross.
pub const PATH_DELIMITER: char = '/';

/// The raw (and path-crossing) wildcard token.
pub const WILDCARD: char = '*';

/// The retagged segment-scoped wildcard token used by the DP matcher.
/// Assumed absent from raw patterns.
pub const SEGMENT_WILDCARD: char = '|';

/// Metacharacters escaped when emitting for the regex strategy.
const REGEX_METACHARACTERS: [char; 7] = ['.', '?', '\\', '|', '+', '(', ')'];

/// Collapse runs of consecutive wildcards to a single wildcard.
/// All other characters pass through unchanged. Idempotent.
pub fn collapse_wildcards(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_was_wildcard = false;
    for c in raw.chars() {
        if c == WILDCARD {
            if !prev_was_wildcard {
                out.push(c);
            }
            prev_was_wildcard = true;
        } else {
            out.push(c);
            prev_was_wildcard = false;
        }
    }
    out
}

/// Locate the scope boundary of a collapsed pattern.
///
/// Returns the character position of the last wildcard at or before the
/// first path delimiter; when the pattern has no delimiter, the last
/// wildcard overall. `None` when no wildcard qualifies. Wildcards at or
/// before the boundary are segment-scoped, wildcards after it are
/// path-crossing.
pub fn scope_boundary(collapsed: &str) -> Option<usize> {
    let delimiter = collapsed.chars().position(|c| c == PATH_DELIMITER);

    let mut boundary = None;
    for (i, c) in collapsed.chars().enumerate() {
        if c == WILDCARD && delimiter.map_or(true, |d| i <= d) {
            boundary = Some(i);
        }
    }
    boundary
}

/// Emit the regex-strategy form: anchored, metacharacters escaped,
/// segment-scoped wildcards as `[^/]*`, path-crossing wildcards as `.*`.
pub fn emit_regex(collapsed: &str, boundary: Option<usize>) -> String {
    let mut out = String::with_capacity(collapsed.len() + 2);
    out.push('^');
    for (i, c) in collapsed.chars().enumerate() {
        if c == WILDCARD {
            if boundary.is_some_and(|b| i <= b) {
                out.push_str("[^/]*");
            } else {
                out.push_str(".*");
            }
        } else if REGEX_METACHARACTERS.contains(&c) {
            out.push('\\');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out.push('$');
    out
}

/// Emit the DP-strategy form: segment-scoped wildcards retagged as
/// [`SEGMENT_WILDCARD`], path-crossing wildcards kept as [`WILDCARD`].
pub fn emit_dp(collapsed: &str, boundary: Option<usize>) -> String {
    collapsed
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if c == WILDCARD && boundary.is_some_and(|b| i <= b) {
                SEGMENT_WILDCARD
            } else {
                c
            }
        })
        .collect()
}

/// Full regex-strategy compilation of one raw pattern.
pub fn compile_regex_pattern(raw: &str) -> String {
    let collapsed = collapse_wildcards(raw);
    let boundary = scope_boundary(&collapsed);
    emit_regex(&collapsed, boundary)
}

/// Full DP-strategy compilation of one raw pattern.
pub fn compile_dp_pattern(raw: &str) -> String {
    let collapsed = collapse_wildcards(raw);
    let boundary = scope_boundary(&collapsed);
    emit_dp(&collapsed, boundary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_runs_to_single_wildcard() {
        assert_eq!(collapse_wildcards("a***b"), "a*b");
        assert_eq!(collapse_wildcards("**"), "*");
        assert_eq!(collapse_wildcards("*a*"), "*a*");
        assert_eq!(collapse_wildcards("no-wildcard"), "no-wildcard");
        assert_eq!(collapse_wildcards(""), "");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        for raw in ["a***b**c", "****", "*.jpg", "host.com/*.jpg", "plain"] {
            let once = collapse_wildcards(raw);
            assert_eq!(collapse_wildcards(&once), once);
        }
    }

    #[test]
    fn test_boundary_without_delimiter_is_last_wildcard() {
        // No delimiter: every wildcard qualifies, boundary is the last one.
        assert_eq!(scope_boundary("*.jpg"), Some(0));
        assert_eq!(scope_boundary("*a*b"), Some(2));
    }

    #[test]
    fn test_boundary_stops_at_first_delimiter() {
        // Wildcard only after the first `/`: nothing qualifies.
        assert_eq!(scope_boundary("host.com/*.jpg"), None);
        // Wildcards on both sides: the last one before `/` wins.
        assert_eq!(scope_boundary("*.com/*.jpg"), Some(0));
    }

    #[test]
    fn test_boundary_without_wildcard() {
        assert_eq!(scope_boundary("host.com/a.jpg"), None);
        assert_eq!(scope_boundary(""), None);
    }

    #[test]
    fn test_emit_regex_escapes_metacharacters() {
        assert_eq!(compile_regex_pattern("a.b"), r"^a\.b$");
        assert_eq!(compile_regex_pattern("a+b?(c)|d\\e"), r"^a\+b\?\(c\)\|d\\e$");
    }

    #[test]
    fn test_emit_regex_wildcard_scopes() {
        // Segment-scoped: must not cross the delimiter.
        assert_eq!(compile_regex_pattern("*.jpg"), r"^[^/]*\.jpg$");
        // Path-crossing: may span segments.
        assert_eq!(compile_regex_pattern("host.com/*.jpg"), r"^host\.com/.*\.jpg$");
        // Mixed.
        assert_eq!(compile_regex_pattern("*.com/*"), r"^[^/]*\.com/.*$");
    }

    #[test]
    fn test_emit_dp_retags_segment_wildcards() {
        assert_eq!(compile_dp_pattern("*.jpg"), "|.jpg");
        assert_eq!(compile_dp_pattern("host.com/*.jpg"), "host.com/*.jpg");
        assert_eq!(compile_dp_pattern("*.com/*"), "|.com/*");
        // No delimiter, so the collapsed wildcard is segment-scoped.
        assert_eq!(compile_dp_pattern("a***b"), "a|b");
    }
}
