//! Reference data compiled into the binary.

use std::path::Path;

use dc20_core::{Catalog, EngineConfig, RulesEnv};

use crate::loaders::{
    AncestryLoader, ClassLoader, ConfigLoader, ContentFactory, LoadResult, PathLoader,
    SkillLoader, TalentLoader, TraitLoader,
};

const CLASSES: &str = include_str!("../data/classes.ron");
const TRAITS: &str = include_str!("../data/traits.ron");
const TALENTS: &str = include_str!("../data/talents.ron");
const ANCESTRIES: &str = include_str!("../data/ancestries.ron");
const SKILLS: &str = include_str!("../data/skills.ron");
const PATHS: &str = include_str!("../data/paths.ron");
const ENGINE: &str = include_str!("../data/engine.toml");

/// A loaded catalog together with the engine configuration shipped beside it.
#[derive(Clone, Debug)]
pub struct ContentCatalog {
    catalog: Catalog,
    config: EngineConfig,
}

impl ContentCatalog {
    /// Parses the bundled DC20 data.
    pub fn builtin() -> LoadResult<Self> {
        let skills = SkillLoader::parse(SKILLS)?;
        let catalog = Catalog::builder()
            .classes(ClassLoader::parse(CLASSES)?)
            .traits(TraitLoader::parse(TRAITS)?)
            .talents(TalentLoader::parse(TALENTS)?)
            .ancestries(AncestryLoader::parse(ANCESTRIES)?)
            .skills(skills.skills)
            .trades(skills.trades)
            .paths(PathLoader::parse(PATHS)?)
            .build();

        Ok(Self {
            catalog,
            config: ConfigLoader::parse(ENGINE)?,
        })
    }

    /// Loads every file from a data directory.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> LoadResult<Self> {
        let factory = ContentFactory::new(data_dir.as_ref());
        Ok(Self {
            catalog: factory.load_catalog()?,
            config: factory.load_config()?,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Oracles backed by this catalog.
    pub fn env(&self) -> RulesEnv<'_> {
        RulesEnv::with_all(&self.catalog)
    }

    pub fn into_parts(self) -> (Catalog, EngineConfig) {
        (self.catalog, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_data_parses() {
        let content = ContentCatalog::builtin().unwrap();
        assert!(content.catalog().classes().len() >= 3);
        assert!(content.config().cache_enabled);
        assert!(content.env().classes.class("barbarian").is_some());
    }
}
