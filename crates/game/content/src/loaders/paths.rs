//! Path table loader.

use std::path::Path;

use dc20_core::PathDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCatalog {
    pub paths: Vec<PathDefinition>,
}

pub struct PathLoader;

impl PathLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<PathDefinition>> {
        Self::parse(&read_file(path)?)
    }

    /// Rejects a file that defines the same path kind twice.
    pub fn parse(content: &str) -> LoadResult<Vec<PathDefinition>> {
        let catalog: PathCatalog = parse_ron(content, "path catalog")?;
        for (i, path) in catalog.paths.iter().enumerate() {
            if catalog.paths[..i].iter().any(|earlier| earlier.kind == path.kind) {
                anyhow::bail!("Duplicate path table for {}", path.kind.as_ref());
            }
        }
        Ok(catalog.paths)
    }
}
