//! Regex matching strategy.
//!
//! Compiles the emitted pattern (see `compile::emit_regex`) with the
//! `regex` crate and tests for a whole-string match; the emitted pattern
//! is already anchored. Compilation failure is fatal to the run; a
//! non-match is a normal negative result.

use regex::Regex;

use crate::error::EngineError;
use crate::matcher::compile::compile_regex_pattern;

/// Match `url` against one raw pattern under the regex strategy.
///
/// The pattern is compiled on every call, matching the ephemeral
/// compilation contract of the engine.
pub fn regex_match(url: &str, raw_pattern: &str) -> Result<bool, EngineError> {
    let compiled = compile_regex_pattern(raw_pattern);
    let regex = Regex::new(&compiled).map_err(|source| EngineError::RegexCompile {
        pattern: raw_pattern.to_string(),
        source,
    })?;
    Ok(regex.is_match(url))
}
