/// Engine configuration and tunable parameters.
///
/// Only the advisory calculation cache is tunable; rule constants live in
/// [`crate::rules`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EngineConfig {
    /// Whether results are memoized at all.
    pub cache_enabled: bool,
    /// How long a memoized result stays valid, in milliseconds.
    pub cache_ttl_ms: u64,
    /// Upper bound on memoized entries.
    pub cache_capacity: usize,
}

impl EngineConfig {
    pub const DEFAULT_CACHE_TTL_MS: u64 = 500;
    pub const DEFAULT_CACHE_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_ms: Self::DEFAULT_CACHE_TTL_MS,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Configuration with memoization turned off.
    pub fn uncached() -> Self {
        Self {
            cache_enabled: false,
            ..Self::new()
        }
    }

    pub fn cache_ttl(&self) -> core::time::Duration {
        core::time::Duration::from_millis(self.cache_ttl_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
