//! Skill and trade catalog loader.

use std::path::Path;

use dc20_core::SkillDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Skills and trades share one file; both lists are id/name/attribute rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
    #[serde(default)]
    pub trades: Vec<SkillDefinition>,
}

pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        parse_ron(content, "skill catalog")
    }
}
