//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce catalog bounds (set count, patterns per set)
//! - Truncate over-long patterns (the defined failure mode, not an error)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Truncation is logged at warn level and never fails the load

use thiserror::Error;
use tracing::warn;

use crate::config::schema::EngineConfig;

/// Maximum number of pattern sets in one catalog.
pub const MAX_SETS: usize = 1000;

/// Maximum number of patterns in one set.
pub const MAX_PATTERNS_PER_SET: usize = 100;

/// Maximum raw pattern length in characters; longer patterns truncate.
pub const MAX_PATTERN_LEN: usize = 100;

/// A single semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("too many pattern sets: {found} (maximum {MAX_SETS})")]
    TooManySets { found: usize },

    #[error("set {key}: too many patterns: {found} (maximum {MAX_PATTERNS_PER_SET})")]
    TooManyPatterns { key: i32, found: usize },
}

/// Validate catalog bounds and truncate over-long patterns in place.
pub fn validate_config(config: &mut EngineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.sets.len() > MAX_SETS {
        errors.push(ValidationError::TooManySets {
            found: config.sets.len(),
        });
    }

    for set in &mut config.sets {
        if set.patterns.len() > MAX_PATTERNS_PER_SET {
            errors.push(ValidationError::TooManyPatterns {
                key: set.key,
                found: set.patterns.len(),
            });
        }

        for pattern in &mut set.patterns {
            if pattern.chars().count() > MAX_PATTERN_LEN {
                warn!(
                    set = set.key,
                    pattern = %pattern,
                    "pattern exceeds {MAX_PATTERN_LEN} characters, truncating"
                );
                *pattern = pattern.chars().take(MAX_PATTERN_LEN).collect();
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
