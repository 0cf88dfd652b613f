//! Cached, thread-safe calculation facade.
use chrono::{DateTime, Utc};
use dc20_content::ContentCatalog;
use dc20_core::{CalculationResult, Catalog, CharacterBuildInput, EngineConfig, RulesEnv, calculate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{CalculationCache, fingerprint};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// A calculation result annotated with its cache provenance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedCalculation {
    #[serde(flatten)]
    pub result: CalculationResult,
    /// When the result was computed, which predates the call on a hit.
    pub cache_timestamp: DateTime<Utc>,
    pub is_from_cache: bool,
}

/// Owns the reference data and the result cache.
///
/// Share one instance behind an `Arc`; every method takes `&self`.
#[derive(Debug)]
pub struct CharacterEngine {
    catalog: Catalog,
    config: EngineConfig,
    cache: CalculationCache,
}

impl CharacterEngine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let cache = CalculationCache::from_config(&config);
        Self {
            catalog,
            config,
            cache,
        }
    }

    /// Engine over the bundled data and its shipped configuration.
    pub fn builtin() -> Result<Self> {
        let (catalog, config) = ContentCatalog::builtin()
            .map_err(RuntimeError::content)?
            .into_parts();
        Ok(Self::new(catalog, config))
    }

    /// Engine over `config.data_dir` (or the bundled data) with the
    /// environment overrides applied.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let content = match &config.data_dir {
            Some(dir) => ContentCatalog::from_dir(dir),
            None => ContentCatalog::builtin(),
        }
        .map_err(RuntimeError::content)?;

        let (catalog, engine_config) = content.into_parts();
        let engine_config = config.apply(engine_config);
        debug!(
            target: "dc20::runtime",
            data_dir = ?config.data_dir,
            cache_enabled = engine_config.cache_enabled,
            cache_ttl_ms = engine_config.cache_ttl_ms,
            "character engine configured"
        );
        Ok(Self::new(catalog, engine_config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn env(&self) -> RulesEnv<'_> {
        RulesEnv::with_all(&self.catalog)
    }

    pub fn cache(&self) -> &CalculationCache {
        &self.cache
    }

    /// Calculates a build, reusing a fresh cached result for identical input.
    ///
    /// Errors are returned as-is and never cached.
    pub fn calculate(&self, input: &CharacterBuildInput) -> Result<CachedCalculation> {
        if !self.config.cache_enabled {
            return self.compute(input);
        }

        let key = fingerprint(input)?;
        if let Some((result, computed_at)) = self.cache.get(&key) {
            debug!(target: "dc20::runtime", build = %input.id, "cache hit");
            return Ok(CachedCalculation {
                result,
                cache_timestamp: computed_at,
                is_from_cache: true,
            });
        }

        let computed = self.compute(input)?;
        self.cache
            .put(key, computed.result.clone(), computed.cache_timestamp);
        Ok(computed)
    }

    /// Drops every cached result.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    fn compute(&self, input: &CharacterBuildInput) -> Result<CachedCalculation> {
        let result = calculate(input, &self.env()).inspect_err(|err| {
            debug!(target: "dc20::runtime", build = %input.id, error = %err, "calculation rejected");
        })?;
        Ok(CachedCalculation {
            result,
            cache_timestamp: Utc::now(),
            is_from_cache: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_is_shareable() {
        assert_send_sync::<CharacterEngine>();
    }

    #[test]
    fn serialized_result_is_flat() {
        let engine = CharacterEngine::builtin().unwrap();
        let output = engine.calculate(&CharacterBuildInput::new(1, "barbarian")).unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["isFromCache"], false);
        assert!(json["cacheTimestamp"].is_string());
        assert!(json["stats"]["finalHPMax"].is_number());
        assert!(json.get("result").is_none());
    }
}
