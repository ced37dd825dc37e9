//! Configuration schema definitions.
//!
//! The pattern catalog is described as an ordered list of sets, each
//! carrying a numeric key and its raw wildcard patterns:
//!
//! ```toml
//! [[set]]
//! key = 1
//! patterns = ["/api/*", "*.png"]
//! ```

use serde::{Deserialize, Serialize};

/// Root configuration for the engine.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EngineConfig {
    /// Pattern sets, in document order.
    #[serde(rename = "set", default)]
    pub sets: Vec<PatternSetConfig>,
}

/// One named pattern set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatternSetConfig {
    /// Externally supplied set identifier. Not required to be unique.
    pub key: i32,

    /// Raw wildcard patterns, in document order.
    #[serde(default)]
    pub patterns: Vec<String>,
}
