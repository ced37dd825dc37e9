//! URL wildcard classification engine.
//!
//! Classifies a stream of URLs against configured sets of wildcard
//! patterns and reports every match. Two interchangeable strategies do
//! the matching: `posix` compiles each pattern to an anchored regex,
//! `self` runs a dynamic-programming wildcard matcher. The pattern
//! catalog can be swapped at runtime (SIGUSR1) while the pipeline keeps
//! running.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod reload;

pub use catalog::{PatternCatalog, PatternGroup, SharedCatalog};
pub use config::{load_config, EngineConfig};
pub use error::EngineError;
pub use matcher::MatchStrategy;
pub use pipeline::Pipeline;
pub use reload::{PauseGate, ReloadCoordinator};
