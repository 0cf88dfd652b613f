//! Talent catalog loader.

use std::path::Path;

use dc20_core::TalentDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentCatalog {
    pub talents: Vec<TalentDefinition>,
}

pub struct TalentLoader;

impl TalentLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<TalentDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<TalentDefinition>> {
        let catalog: TalentCatalog = parse_ron(content, "talent catalog")?;
        Ok(catalog.talents)
    }
}
