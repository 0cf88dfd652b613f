//! Content factory for building the reference catalog from data files.

use std::path::{Path, PathBuf};

use dc20_core::{
    AncestryDefinition, Catalog, ClassDefinition, EngineConfig, PathDefinition, TalentDefinition,
    TraitDefinition,
};

use crate::loaders::{
    AncestryLoader, ClassLoader, ConfigLoader, LoadResult, PathLoader, SkillCatalog, SkillLoader,
    TalentLoader, TraitLoader,
};

/// Content factory that loads all rules content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── engine.toml
/// ├── classes.ron
/// ├── traits.ron
/// ├── talents.ron
/// ├── ancestries.ron
/// ├── skills.ron
/// └── paths.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `engine.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("engine.toml");
        if !path.exists() {
            tracing::debug!(target: "dc20::content", path = %path.display(), "no engine.toml, using defaults");
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load classes from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<Vec<ClassDefinition>> {
        ClassLoader::load(&self.data_dir.join("classes.ron"))
    }

    /// Load ancestry traits from `traits.ron`.
    pub fn load_traits(&self) -> LoadResult<Vec<TraitDefinition>> {
        TraitLoader::load(&self.data_dir.join("traits.ron"))
    }

    /// Load talents from `talents.ron`.
    pub fn load_talents(&self) -> LoadResult<Vec<TalentDefinition>> {
        TalentLoader::load(&self.data_dir.join("talents.ron"))
    }

    /// Load ancestries from `ancestries.ron`.
    pub fn load_ancestries(&self) -> LoadResult<Vec<AncestryDefinition>> {
        AncestryLoader::load(&self.data_dir.join("ancestries.ron"))
    }

    /// Load skills and trades from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load path tables from `paths.ron`.
    pub fn load_paths(&self) -> LoadResult<Vec<PathDefinition>> {
        PathLoader::load(&self.data_dir.join("paths.ron"))
    }

    /// Load every catalog file into one [`Catalog`].
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let skills = self.load_skills()?;
        Ok(Catalog::builder()
            .classes(self.load_classes()?)
            .traits(self.load_traits()?)
            .talents(self.load_talents()?)
            .ancestries(self.load_ancestries()?)
            .skills(skills.skills)
            .trades(skills.trades)
            .paths(self.load_paths()?)
            .build())
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let factory = ContentFactory::new("/nonexistent/dc20-data");
        assert_eq!(factory.load_config().unwrap(), EngineConfig::default());
        assert!(factory.load_classes().is_err());
    }
}
