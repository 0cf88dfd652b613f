//! Content loaders for reading rules data from files.
//!
//! Each loader reads one RON (or TOML) file into `dc20-core` types. Every
//! loader also accepts the file contents directly so the bundled copies can
//! be parsed without touching the filesystem.

pub mod ancestries;
pub mod classes;
pub mod config;
pub mod factory;
pub mod paths;
pub mod skills;
pub mod talents;
pub mod traits;

pub use ancestries::AncestryLoader;
pub use classes::ClassLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use paths::PathLoader;
pub use skills::{SkillCatalog, SkillLoader};
pub use talents::TalentLoader;
pub use traits::TraitLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses RON, naming the catalog in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
