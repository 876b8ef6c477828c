//! Memo tables for resolved favicons.
//!
//! A [`Resolver`](crate::Resolver) owns exactly one [`FaviconCache`]. The
//! default, [`MemoryCache`], never forgets anything and lives as long as the
//! resolver does. Long-running hosts can swap in a [`BoundedCache`] instead.

mod bounded;

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Duration;

pub use self::bounded::BoundedCache;

/// A memo table mapping link URLs to their resolved favicon URLs.
///
/// Only successful resolutions are ever stored. Lookups take `&mut self` so
/// that implementations may expire entries as they're read.
pub trait FaviconCache: Send {
    /// Look up the favicon previously stored for exactly this `url`.
    fn get(&mut self, url: &str) -> Option<String>;

    /// Remember `favicon` for `url`, replacing any previous entry.
    fn insert(&mut self, url: &str, favicon: &str);

    /// Number of entries currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything.
    fn clear(&mut self);
}

/// Unbounded in-memory memo. Entries accumulate for the cache's lifetime.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}
impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}
impl FaviconCache for MemoryCache {
    fn get(&mut self, url: &str) -> Option<String> {
        self.entries.get(url).cloned()
    }

    fn insert(&mut self, url: &str, favicon: &str) {
        self.entries.insert(url.to_string(), favicon.to_string());
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A cache that remembers nothing; every thorough lookup hits the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;
impl FaviconCache for NoCache {
    fn get(&mut self, _url: &str) -> Option<String> {
        None
    }

    fn insert(&mut self, _url: &str, _favicon: &str) {}

    fn len(&self) -> usize {
        0
    }

    fn clear(&mut self) {}
}

/// Declarative cache settings, turned into a concrete cache by
/// [`build`](Self::build).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CacheConfig {
    /// When `false`, nothing is memoized at all.
    pub enabled: bool,
    /// Maximum number of entries; `None` means unbounded.
    pub capacity: Option<usize>,
    /// Seconds an entry stays valid; `None` means forever.
    pub ttl: Option<u64>,
}
impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: None,
            ttl: None,
        }
    }
}
impl CacheConfig {
    pub fn build(&self) -> Box<dyn FaviconCache> {
        if !self.enabled {
            return Box::new(NoCache);
        }
        let ttl = self.ttl.map(Duration::from_secs);
        match (self.capacity.and_then(NonZeroUsize::new), ttl) {
            (None, None) => Box::new(MemoryCache::new()),
            (None, Some(ttl)) => Box::new(BoundedCache::expiring(ttl)),
            (Some(capacity), None) => Box::new(BoundedCache::new(capacity)),
            (Some(capacity), Some(ttl)) => Box::new(BoundedCache::new(capacity).with_ttl(ttl)),
        }
    }
}
