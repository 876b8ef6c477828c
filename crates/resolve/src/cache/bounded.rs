use std::num::NonZeroUsize;
use std::time::Duration;

use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use super::FaviconCache;

/// Memo with an optional capacity and an optional time-to-live, backed by
/// [`moka`].
///
/// When full, the least recently used entry is evicted. Expired entries are
/// never returned, and are dropped during the cache's housekeeping, which runs
/// on every write.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use std::time::Duration;
/// use favi_resolve::cache::{BoundedCache, FaviconCache};
///
/// let mut cache = BoundedCache::new(NonZeroUsize::new(2).unwrap()).with_ttl(Duration::from_secs(3600));
/// cache.insert("http://a", "http://a/favicon.ico");
/// cache.insert("http://b", "http://b/favicon.ico");
/// cache.insert("http://c", "http://c/favicon.ico");
/// assert!(cache.get("http://a").is_none());
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedCache {
    inner: Cache<String, String>,
    capacity: Option<NonZeroUsize>,
    ttl: Option<Duration>,
}
impl BoundedCache {
    /// Holds at most `capacity` entries, forever.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::build(Some(capacity), None)
    }

    /// Holds any number of entries, each for `ttl`.
    pub fn expiring(ttl: Duration) -> Self {
        Self::build(None, Some(ttl))
    }

    /// Entries expire `ttl` after they were stored. Starts from an empty cache.
    pub fn with_ttl(self, ttl: Duration) -> Self {
        Self::build(self.capacity, Some(ttl))
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn build(capacity: Option<NonZeroUsize>, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::<String, String>::builder().eviction_policy(EvictionPolicy::lru());
        if let Some(capacity) = capacity {
            builder = builder.max_capacity(capacity.get() as u64);
        }
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            inner: builder.build(),
            capacity,
            ttl,
        }
    }
}
impl FaviconCache for BoundedCache {
    fn get(&mut self, url: &str) -> Option<String> {
        self.inner.get(url)
    }

    fn insert(&mut self, url: &str, favicon: &str) {
        self.inner.insert(url.to_string(), favicon.to_string());
        // Eviction and expiry are applied lazily by moka; settle them now so
        // the size bound holds as soon as `insert` returns.
        self.inner.run_pending_tasks();
    }

    fn len(&self) -> usize {
        self.inner.run_pending_tasks();
        self.inner.entry_count() as usize
    }

    fn clear(&mut self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }
}
