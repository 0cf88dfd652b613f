//! Runtime facade for the DC20 character engine.
//!
//! Wires the bundled (or on-disk) reference data, the pure calculation
//! pipeline from `dc20-core` and an advisory result cache into one
//! [`CharacterEngine`] that applications share across threads.
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the facade and the cache-annotated result
//! - [`cache`] holds the TTL cache and input fingerprinting
//! - [`config`] reads environment overrides
//! - [`error`] defines the unified error type
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;

pub use cache::{CalculationCache, fingerprint};
pub use config::RuntimeConfig;
pub use engine::{CachedCalculation, CharacterEngine};
pub use error::{Result, RuntimeError};
