//! Ancestry trait loader.

use std::path::Path;

use dc20_core::TraitDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Trait catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitCatalog {
    pub traits: Vec<TraitDefinition>,
}

/// Loader for ancestry traits from RON files.
pub struct TraitLoader;

impl TraitLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<TraitDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<TraitDefinition>> {
        let catalog: TraitCatalog = parse_ron(content, "trait catalog")?;
        Ok(catalog.traits)
    }
}
