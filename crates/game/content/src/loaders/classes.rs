//! Class catalog loader.

use std::path::Path;

use dc20_core::ClassDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Class catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// Loader for class definitions from RON files.
pub struct ClassLoader;

impl ClassLoader {
    /// Load class definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a ClassCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ClassDefinition>> {
        let catalog: ClassCatalog = parse_ron(content, "class catalog")?;
        for class in &catalog.classes {
            tracing::debug!(
                target: "dc20::content",
                class = %class.id,
                levels = class.progression.len(),
                features = class.features.len(),
                "loaded class"
            );
        }
        Ok(catalog.classes)
    }
}
