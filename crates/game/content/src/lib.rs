//! Data-driven DC20 reference data and loaders.
//!
//! This crate houses the bundled rules content and provides loaders for
//! RON/TOML data files:
//! - Classes with progression tables, features and subclasses
//! - Ancestries and ancestry traits
//! - Talents
//! - Skills and trades
//! - Martial and spellcasting path tables
//! - Engine configuration (TOML)
//!
//! Content is consumed through the `dc20-core` oracles and never appears in
//! a calculation result except as effect provenance.

#[cfg(feature = "loaders")]
pub mod bundled;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use bundled::ContentCatalog;
#[cfg(feature = "loaders")]
pub use loaders::{
    AncestryLoader, ClassLoader, ConfigLoader, ContentFactory, LoadResult, PathLoader,
    SkillLoader, TalentLoader, TraitLoader,
};
