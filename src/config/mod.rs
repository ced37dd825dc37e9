//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (bounds checks, pattern truncation)
//!     → EngineConfig (validated, immutable)
//!     → catalog::PatternCatalog (built wholesale from the config)
//!
//! On SIGUSR1:
//!     reload::ReloadCoordinator pauses workers
//!     → loader.rs loads the file again
//!     → a fresh PatternCatalog is built
//!     → atomic swap of the shared catalog snapshot
//!     → workers resume against the new generation
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - Over-long patterns are truncated with a warning, not rejected
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::{EngineConfig, PatternSetConfig};
