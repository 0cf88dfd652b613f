//! Ancestry catalog loader.

use std::path::Path;

use dc20_core::AncestryDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncestryCatalog {
    pub ancestries: Vec<AncestryDefinition>,
}

pub struct AncestryLoader;

impl AncestryLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AncestryDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AncestryDefinition>> {
        let catalog: AncestryCatalog = parse_ron(content, "ancestry catalog")?;
        Ok(catalog.ancestries)
    }
}
