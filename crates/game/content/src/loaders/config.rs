//! Engine configuration loader.

use std::path::Path;

use dc20_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing EngineConfig
    ///
    /// # Returns
    ///
    /// Returns an EngineConfig. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("cacheEnabled = false\n").unwrap();
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_ttl_ms, EngineConfig::DEFAULT_CACHE_TTL_MS);
        assert_eq!(config.cache_capacity, EngineConfig::DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigLoader::parse("cacheTtlMs = \"soon\"\n").is_err());
    }
}
