//! Time-expiring query cache.
//!
//! Keys are normalized to lowercase so that queries differing only in case
//! share one entry. An entry is served strictly before its expiry instant;
//! at or after it the entry behaves as if it was never stored.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Default validity window for cached query results.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// A cached value together with the query it answers and its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Lowercased query text; identical to the map key.
    pub query: String,
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Returns `true` while `now` is strictly before `expires_at`.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local memoization of query results.
///
/// Entries are replaced wholesale on [`store`](Self::store), so concurrent
/// writers for the same key resolve to last-store-wins. There is no eviction
/// beyond overwrite: the number of distinct queries typed in one editor
/// session is small enough to keep them all.
///
/// # Examples
///
/// ```
/// use directives_core::cache::QueryCache;
/// use std::time::Duration;
///
/// let cache = QueryCache::new(Duration::from_secs(300));
/// cache.store("ABC", vec![1, 2, 3]);
///
/// assert_eq!(cache.lookup("abc"), Some(vec![1, 2, 3]));
/// assert_eq!(cache.lookup("other"), None);
/// ```
pub struct QueryCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> QueryCache<V> {
    /// Creates an empty cache whose entries stay valid for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `query` if it has not expired yet.
    ///
    /// An expired entry is removed on the way out and reported as absent.
    pub fn lookup(&self, query: &str) -> Option<V> {
        let key = normalize_key(query);
        let now = Instant::now();

        if let Some(entry) = self.entries.get(&key) {
            if entry.is_valid_at(now) {
                tracing::debug!(query = %key, "query cache hit");
                return Some(entry.value.clone());
            }
        } else {
            tracing::debug!(query = %key, "query cache miss");
            return None;
        }

        tracing::debug!(query = %key, "query cache entry expired");
        self.entries
            .remove_if(&key, |_, entry| !entry.is_valid_at(now));
        None
    }

    /// Inserts or overwrites the entry for `query`, valid for the cache TTL.
    pub fn store(&self, query: &str, value: V) {
        let key = normalize_key(query);
        let entry = CacheEntry {
            query: key.clone(),
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.insert(key, entry);
    }

    /// Number of stored entries, expired ones included until they are looked up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

fn normalize_key(query: &str) -> String {
    query.to_lowercase()
}
