//! Pattern catalog: the live set of pattern groups.
//!
//! # Responsibilities
//! - Hold the ordered pattern groups built from the configuration
//! - Expose insertion-ordered iteration for the matchers
//! - Share one immutable generation with all workers, swappable on reload
//!
//! # Design Decisions
//! - A catalog generation is immutable after construction; a reload builds
//!   a complete replacement and publishes it with an atomic pointer swap
//!   (`ArcSwap`), so readers never observe a partially built generation
//! - Group keys are externally supplied and not required to be unique

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::EngineConfig;

/// One pattern set: an external key plus its raw patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    /// Externally supplied set identifier.
    pub key: i32,

    /// Raw wildcard patterns, in configuration order.
    pub patterns: Vec<String>,
}

/// One complete, self-consistent generation of the pattern sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternCatalog {
    groups: Vec<PatternGroup>,
}

impl PatternCatalog {
    /// Build a catalog from a validated configuration, preserving order.
    pub fn from_config(config: &EngineConfig) -> Self {
        let groups = config
            .sets
            .iter()
            .map(|set| PatternGroup {
                key: set.key,
                patterns: set.patterns.clone(),
            })
            .collect();
        Self { groups }
    }

    /// Iterate groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &PatternGroup> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Dump the catalog contents at debug level, one line per set.
    pub fn trace_contents(&self) {
        for group in self.groups() {
            tracing::debug!(set = group.key, patterns = ?group.patterns, "catalog set");
        }
    }
}

/// Handle to the live catalog generation, shared by all workers.
///
/// Readers take a snapshot and match against it; the reload task publishes
/// a new generation with a single atomic store. A worker that took its
/// snapshot before a swap keeps matching against the old generation for
/// the item in flight, which is the documented best-effort contract.
#[derive(Clone)]
pub struct SharedCatalog {
    inner: Arc<ArcSwap<PatternCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: PatternCatalog) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(catalog)),
        }
    }

    /// Take an immutable snapshot of the current generation.
    pub fn snapshot(&self) -> Arc<PatternCatalog> {
        self.inner.load_full()
    }

    /// Publish a new generation, atomically replacing the old one.
    pub fn replace(&self, catalog: PatternCatalog) {
        self.inner.store(Arc::new(catalog));
    }
}
