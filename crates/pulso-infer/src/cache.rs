//! LRU cache of pairwise similarity scores.
//!
//! Target lexicalization compares the same words over and over across
//! clusters. `CachedOracle` memoizes each pair once per run.
//! Default: 10,000 pairs.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::oracle::SimilarityOracle;

/// Thread-safe LRU cache keyed by an unordered string pair.
pub struct ScoreCache {
    inner: Mutex<LruCache<(String, String), f64>>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl ScoreCache {
    /// Create a new cache with the given capacity.
    pub fn new(max_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Create a cache with default settings (10,000 pairs).
    pub fn default_cache() -> Self {
        Self::new(10_000)
    }

    /// Get a cached score and mark the pair as recently used.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.inner.lock().get(&pair_key(a, b)).copied()
    }

    /// Insert a score, evicting the least recently used pair when full.
    pub fn put(&self, a: &str, b: &str, score: f64) {
        self.inner.lock().put(pair_key(a, b), score);
    }

    /// Number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of pairs kept.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

/// Oracle wrapper that memoizes scores of a symmetric backend.
pub struct CachedOracle {
    inner: Box<dyn SimilarityOracle>,
    cache: ScoreCache,
}

impl CachedOracle {
    pub fn new(inner: Box<dyn SimilarityOracle>) -> Self {
        Self::with_cache(inner, ScoreCache::default_cache())
    }

    pub fn with_cache(inner: Box<dyn SimilarityOracle>, cache: ScoreCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }
}

impl SimilarityOracle for CachedOracle {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = self.cache.get(a, b) {
            return score;
        }
        let score = self.inner.similarity(a, b);
        self.cache.put(a, b, score);
        score
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingOracle(Arc<AtomicUsize>);

    impl SimilarityOracle for CountingOracle {
        fn similarity(&self, _a: &str, _b: &str) -> f64 {
            self.0.fetch_add(1, Ordering::SeqCst);
            0.75
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_cache_hit_and_miss() {
        let cache = ScoreCache::new(10);
        assert!(cache.get("kanal", "kalye").is_none());

        cache.put("kanal", "kalye", 0.25);
        assert_eq!(cache.get("kanal", "kalye"), Some(0.25));
        // Pairs are unordered
        assert_eq!(cache.get("kalye", "kanal"), Some(0.25));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_eviction() {
        let cache = ScoreCache::new(2);
        cache.put("a", "x", 0.1);
        cache.put("b", "x", 0.2);
        assert_eq!(cache.len(), 2);

        // Adding third should evict ("a", "x")
        cache.put("c", "x", 0.3);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a", "x").is_none());
        assert!(cache.get("b", "x").is_some());
        assert!(cache.get("c", "x").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let cache = ScoreCache::new(2);
        cache.put("a", "x", 0.1);
        cache.put("b", "x", 0.2);

        // Touch ("a", "x") so ("b", "x") becomes the oldest
        assert_eq!(cache.get("x", "a"), Some(0.1));
        cache.put("c", "x", 0.3);
        assert!(cache.get("b", "x").is_none());
        assert_eq!(cache.get("a", "x"), Some(0.1));
    }

    #[test]
    fn test_cache_stays_bounded() {
        let cache = ScoreCache::new(1_000);
        for i in 0..5_000 {
            cache.put(&format!("gawa{}", i), "kanal", 0.5);
        }
        assert_eq!(cache.len(), 1_000);
        assert_eq!(cache.capacity(), 1_000);
        assert!(cache.get("gawa4999", "kanal").is_some());
        assert!(cache.get("gawa0", "kanal").is_none());

        assert_eq!(ScoreCache::new(0).capacity(), 1);
    }

    #[test]
    fn test_cached_oracle_calls_backend_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let oracle = CachedOracle::new(Box::new(CountingOracle(calls.clone())));

        assert_eq!(oracle.similarity("maglinis", "linisin"), 0.75);
        assert_eq!(oracle.similarity("linisin", "maglinis"), 0.75);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(oracle.name(), "counting");
        assert_eq!(oracle.cache().len(), 1);
    }
}
