//! Match engine: evaluates URLs against the pattern catalog.
//!
//! # Data Flow
//! ```text
//! catalog snapshot + URL
//!     → compile.rs (collapse, scope split, emission — per match attempt)
//!     → regex.rs or dp.rs (strategy selected at startup)
//!     → MatchHit per matching pattern, in catalog iteration order
//!     → render_report (one output line per URL with ≥1 match)
//! ```
//!
//! # Design Decisions
//! - Both strategies agree on match/no-match for patterns without
//!   regex-unsafe literals; the DP matcher is the hand-rolled alternative
//!   to pulling in a regex engine per match
//! - Matches for one URL are reported together, in catalog order

pub mod compile;
pub mod dp;
pub mod regex;

use std::fmt;
use std::str::FromStr;

use crate::catalog::PatternCatalog;
use crate::error::EngineError;

/// The matching strategy, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Compile each pattern to an anchored regex and test it.
    Posix,
    /// The dynamic-programming wildcard matcher.
    SelfMatch,
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posix" => Ok(Self::Posix),
            "self" => Ok(Self::SelfMatch),
            other => Err(format!("unknown strategy `{other}` (expected posix|self)")),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => f.write_str("posix"),
            Self::SelfMatch => f.write_str("self"),
        }
    }
}

/// One pattern that matched a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHit<'a> {
    /// The raw pattern text as configured.
    pub pattern: &'a str,

    /// The key of the set the pattern belongs to.
    pub set_key: i32,
}

/// Match one URL against every group and pattern in the catalog.
///
/// Hits are returned in catalog iteration order (groups, then patterns,
/// both insertion-ordered). An empty result is a normal outcome.
pub fn match_url<'a>(
    catalog: &'a PatternCatalog,
    url: &str,
    strategy: MatchStrategy,
) -> Result<Vec<MatchHit<'a>>, EngineError> {
    let mut hits = Vec::new();
    for group in catalog.groups() {
        for pattern in &group.patterns {
            let matched = match strategy {
                MatchStrategy::Posix => regex::regex_match(url, pattern)?,
                MatchStrategy::SelfMatch => {
                    dp::dp_match(url, &compile::compile_dp_pattern(pattern))
                }
            };
            if matched {
                hits.push(MatchHit {
                    pattern: pattern.as_str(),
                    set_key: group.key,
                });
            }
        }
    }
    Ok(hits)
}

/// Render the report line for one URL, or `None` when nothing matched.
///
/// Format: `url: <url>, pattern: <p1>, set: <k1> pattern: <p2>, set: <k2>`
pub fn render_report(url: &str, hits: &[MatchHit<'_>]) -> Option<String> {
    if hits.is_empty() {
        return None;
    }
    let mut line = format!("url: {url},");
    for hit in hits {
        line.push_str(&format!(" pattern: {}, set: {}", hit.pattern, hit.set_key));
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, PatternSetConfig};

    fn catalog(sets: Vec<(i32, Vec<&str>)>) -> PatternCatalog {
        PatternCatalog::from_config(&EngineConfig {
            sets: sets
                .into_iter()
                .map(|(key, patterns)| PatternSetConfig {
                    key,
                    patterns: patterns.into_iter().map(String::from).collect(),
                })
                .collect(),
        })
    }

    #[test]
    fn test_hits_follow_catalog_order() {
        let catalog = catalog(vec![(2, vec!["*.png", "logo.*"]), (1, vec!["logo.png"])]);
        let hits = match_url(&catalog, "logo.png", MatchStrategy::SelfMatch).unwrap();
        let rendered: Vec<_> = hits.iter().map(|h| (h.pattern, h.set_key)).collect();
        assert_eq!(
            rendered,
            vec![("*.png", 2), ("logo.*", 2), ("logo.png", 1)]
        );
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = catalog(vec![(1, vec!["*.png"])]);
        let hits = match_url(&catalog, "logo.gif", MatchStrategy::Posix).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_duplicate_set_keys_are_allowed() {
        let catalog = catalog(vec![(5, vec!["a*"]), (5, vec!["*b"])]);
        let hits = match_url(&catalog, "ab", MatchStrategy::SelfMatch).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.set_key == 5));
    }

    #[test]
    fn test_render_report_format() {
        let catalog = catalog(vec![(1, vec!["/api/*"]), (3, vec!["/*"])]);
        let hits = match_url(&catalog, "/api/users", MatchStrategy::Posix).unwrap();
        assert_eq!(
            render_report("/api/users", &hits).unwrap(),
            "url: /api/users, pattern: /api/*, set: 1 pattern: /*, set: 3"
        );
        assert_eq!(render_report("/other", &[]), None);
    }

    #[test]
    fn test_strategies_agree_on_corpus() {
        // Representative corpus without regex-unsafe literals and without
        // empty URLs (the DP boundary cases are defined independently).
        let patterns = [
            "*.jpg",
            "host.com/*.jpg",
            "*.com/*",
            "/api/*",
            "*",
            "a*b",
            "host.com",
            "*/",
            "a**b*c",
        ];
        let urls = [
            "a.jpg",
            "a/b.jpg",
            "host.com/a.jpg",
            "host.com/a/b.jpg",
            "img.com/x",
            "/api/users",
            "/api",
            "host.com",
            "plain",
            "axxb",
            "a/b",
            "aXbYc",
            "x/",
        ];
        for pattern in patterns {
            let dp_pattern = compile::compile_dp_pattern(pattern);
            for url in urls {
                assert_eq!(
                    regex::regex_match(url, pattern).unwrap(),
                    dp::dp_match(url, &dp_pattern),
                    "strategies disagree for url={url} pattern={pattern}"
                );
            }
        }
    }
}
