//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use dc20_core::EngineConfig;

/// Overrides layered on top of the data directory's `engine.toml`.
///
/// Unset fields keep whatever the loaded content configured.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Load reference data from here instead of the bundled copy.
    pub data_dir: Option<PathBuf>,
    pub cache_enabled: Option<bool>,
    pub cache_ttl_ms: Option<u64>,
    pub cache_capacity: Option<usize>,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `DC20_DATA_DIR`
    /// - `DC20_CACHE_ENABLED`
    /// - `DC20_CACHE_TTL_MS`
    /// - `DC20_CACHE_CAPACITY`
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_dir: var("DC20_DATA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            cache_enabled: var("DC20_CACHE_ENABLED").and_then(|value| parse_bool(&value)),
            cache_ttl_ms: read_var(&var, "DC20_CACHE_TTL_MS"),
            cache_capacity: read_var::<usize>(&var, "DC20_CACHE_CAPACITY").map(|cap| cap.max(1)),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Applies the overrides that are set.
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(enabled) = self.cache_enabled {
            config.cache_enabled = enabled;
        }
        if let Some(ttl) = self.cache_ttl_ms {
            config.cache_ttl_ms = ttl;
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache_capacity = capacity;
        }
        config
    }
}

fn read_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    var(key)?.trim().parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_changes_nothing() {
        let config = RuntimeConfig::from_vars(vars(&[]));
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.apply(EngineConfig::new()), EngineConfig::new());
    }

    #[test]
    fn overrides_are_applied() {
        let config = RuntimeConfig::from_vars(vars(&[
            ("DC20_DATA_DIR", "/srv/dc20"),
            ("DC20_CACHE_ENABLED", "off"),
            ("DC20_CACHE_TTL_MS", "1500"),
            ("DC20_CACHE_CAPACITY", "0"),
        ]));

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/dc20")));
        let engine = config.apply(EngineConfig::new());
        assert!(!engine.cache_enabled);
        assert_eq!(engine.cache_ttl_ms, 1500);
        assert_eq!(engine.cache_capacity, 1);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = RuntimeConfig::from_vars(vars(&[
            ("DC20_CACHE_ENABLED", "maybe"),
            ("DC20_CACHE_TTL_MS", "soon"),
            ("DC20_DATA_DIR", "  "),
        ]));
        assert_eq!(config, RuntimeConfig::default());
    }
}
