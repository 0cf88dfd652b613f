//! Advisory memoization of calculation results.
//!
//! The cache only saves work. A hit returns the exact result a miss would
//! have computed, because entries are keyed by a SHA-256 fingerprint of the
//! whole build input. `get`, `put` and `invalidate` are the only mutators.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dc20_core::{CalculationResult, CharacterBuildInput, EngineConfig};
use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::error::{Result, RuntimeError};

/// Hex SHA-256 of the serialized build.
///
/// Map-valued fields are ordered maps, so equal inputs always serialize to
/// the same bytes.
pub fn fingerprint(input: &CharacterBuildInput) -> Result<String> {
    let bytes = serde_json::to_vec(input).map_err(RuntimeError::Fingerprint)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[derive(Clone, Debug)]
struct CacheEntry {
    result: CalculationResult,
    computed_at: DateTime<Utc>,
    inserted: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted) >= ttl
    }
}

/// TTL-bounded LRU result cache.
#[derive(Debug)]
pub struct CalculationCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl CalculationCache {
    /// A zero capacity is treated as one.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.cache_ttl(), config.cache_capacity)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// A fresh entry and the time it was computed. A hit marks the entry as
    /// most recently used; expired entries are dropped on lookup.
    pub fn get(&self, fingerprint: &str) -> Option<(CalculationResult, DateTime<Utc>)> {
        self.get_at(fingerprint, Instant::now())
    }

    pub(crate) fn get_at(
        &self,
        fingerprint: &str,
        now: Instant,
    ) -> Option<(CalculationResult, DateTime<Utc>)> {
        let mut cache = self.lock();
        let entry = cache.get(fingerprint)?;
        if !entry.is_expired(self.ttl, now) {
            return Some((entry.result.clone(), entry.computed_at));
        }
        cache.pop(fingerprint);
        None
    }

    /// Stores a result, evicting the least recently used entry when full.
    pub fn put(&self, fingerprint: String, result: CalculationResult, computed_at: DateTime<Utc>) {
        let entry = CacheEntry {
            result,
            computed_at,
            inserted: Instant::now(),
        };
        let evicted = self.lock().push(fingerprint.clone(), entry);
        if let Some((key, _)) = evicted.filter(|(key, _)| *key != fingerprint) {
            tracing::trace!(target: "dc20::runtime", evicted = %key, "calculation cache evicted entry");
        }
    }

    /// Drops every entry.
    pub fn invalidate(&self) {
        let mut cache = self.lock();
        let dropped = cache.len();
        cache.clear();
        tracing::debug!(target: "dc20::runtime", dropped, "calculation cache invalidated");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A panic while holding the lock cannot leave an entry half-written,
    /// so a poisoned cache is still usable.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc20_content::ContentCatalog;
    use dc20_core::calculate;

    fn sample_result() -> CalculationResult {
        let content = ContentCatalog::builtin().expect("bundled data");
        calculate(&CharacterBuildInput::new(1, "barbarian"), &content.env()).expect("calculates")
    }

    #[test]
    fn fingerprint_tracks_every_field() {
        let base = CharacterBuildInput::new(1, "barbarian");
        let same = CharacterBuildInput::new(1, "barbarian");
        let other = CharacterBuildInput::new(1, "barbarian").with_skill("athletics", 1);

        let key = fingerprint(&base).unwrap();
        assert_eq!(key.len(), 64);
        assert_eq!(key, fingerprint(&same).unwrap());
        assert_ne!(key, fingerprint(&other).unwrap());
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = CalculationCache::new(Duration::from_millis(500), 4);
        let stamp = Utc::now();
        cache.put("a".into(), sample_result(), stamp);

        let now = Instant::now();
        assert_eq!(cache.get_at("a", now).map(|(_, at)| at), Some(stamp));
        assert!(cache.get_at("a", now + Duration::from_millis(501)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = CalculationCache::new(Duration::from_secs(60), 2);
        let result = sample_result();
        cache.put("a".into(), result.clone(), Utc::now());
        cache.put("b".into(), result.clone(), Utc::now());
        cache.put("c".into(), result, Utc::now());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn reads_keep_entries_alive() {
        let cache = CalculationCache::new(Duration::from_secs(60), 2);
        let result = sample_result();
        cache.put("a".into(), result.clone(), Utc::now());
        cache.put("b".into(), result.clone(), Utc::now());
        assert!(cache.get("a").is_some());
        cache.put("c".into(), result, Utc::now());

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn zero_capacity_holds_one_entry() {
        let cache = CalculationCache::new(Duration::from_secs(60), 0);
        assert_eq!(cache.capacity(), 1);
        cache.put("a".into(), sample_result(), Utc::now());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_clears_everything() {
        let cache = CalculationCache::new(Duration::from_secs(60), 8);
        cache.put("a".into(), sample_result(), Utc::now());
        cache.invalidate();
        assert!(cache.get("a").is_none());
    }
}
