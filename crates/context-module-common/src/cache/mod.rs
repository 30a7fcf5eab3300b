use std::hash::Hash;
use std::time::{Duration, Instant};

use moka::sync::Cache;

/// A value stamped with the instant it was stored.
///
/// - Past `validity` the value is **stale**: it should be refreshed but may be served as a fallback.
/// - Past `2 * validity` the value is **expired** and must not be served.
#[derive(Clone, Debug)]
pub struct Expirable<T> {
    stored_at: Instant,
    validity: Duration,
    value: T,
}

impl<T> Expirable<T> {
    pub fn new(value: T, validity: Duration) -> Self {
        Self {
            stored_at: Instant::now(),
            validity,
            value,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stored_at.elapsed() >= self.validity
    }

    pub fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.validity.saturating_mul(2)
    }

}

/// Bounded cache whose entries go stale and then expire. See [`Expirable`].
#[derive(Clone)]
pub struct ExpirableCache<K, V> {
    cache: Cache<K, Expirable<V>>,
}

impl<K, V> ExpirableCache<K, V>
where
    K: 'static + Eq + Hash + Send + Sync,
    V: 'static + Clone + Send + Sync,
{
    pub fn new(capacity: u64) -> Self {
        Self { cache: Cache::new(capacity) }
    }

    /// Fresh value only.
    pub fn get_if_not_stale(&self, key: &K) -> Option<V> {
        self.cache.get(key).filter(|x| !x.is_stale()).map(|x| x.value.clone())
    }

    /// Fresh or stale value, used as a fallback when a refresh fails.
    pub fn get_if_not_expired(&self, key: &K) -> Option<V> {
        self.cache.get(key).filter(|x| !x.is_expired()).map(|x| x.value.clone())
    }

    pub fn insert(&self, key: K, value: V, validity: Duration) {
        self.cache.insert(key, Expirable::new(value, validity));
    }
}
