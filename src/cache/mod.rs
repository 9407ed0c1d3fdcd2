//! Compiled-template cache.
//!
//! Holds compiled render functions keyed by [`ViewKey`], bounded by the
//! configured `max_cache` and evicting the least recently used entry when
//! full. The cache is shared by every render call of one
//! [`ViewEngine`](crate::view::ViewEngine); an internal mutex guards the map
//! and is held only while the map itself is touched, never across template
//! loading or compilation.
//!
//! Only successfully compiled templates are ever stored. Whether the cache is
//! consulted on reads is decided by the dispatcher (production mode); the
//! cache itself has no notion of modes.

mod lru;

pub use lru::LruCache;

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::resolver::PageKey;

/// Key of one compiled view: the page plus the layout wrapped around it.
///
/// Including the layout keeps per-call layout overrides from colliding with
/// the configured layout for the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub page: PageKey,
    pub layout: Option<PageKey>,
}

impl ViewKey {
    #[must_use]
    pub const fn new(page: PageKey, layout: Option<PageKey>) -> Self {
        Self {
            page,
            layout,
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layout {
            Some(layout) => write!(f, "{} (layout {})", self.page, layout),
            None => write!(f, "{}", self.page),
        }
    }
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate as a percentage.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

#[derive(Debug)]
struct Inner<V> {
    entries: LruCache<ViewKey, V>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Thread-safe LRU of compiled views with hit/miss statistics.
#[derive(Debug)]
pub struct CompiledCache<V> {
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> CompiledCache<V> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
        }
    }

    /// Look up a compiled view, counting the hit or miss.
    pub fn get(&self, key: &ViewKey) -> Option<V> {
        let mut inner = self.lock();
        if let Some(value) = inner.entries.get(key).cloned() {
            inner.hits += 1;
            Some(value)
        } else {
            inner.misses += 1;
            None
        }
    }

    /// Look up `key` again after a [`get`](Self::get) miss, once the caller
    /// has waited for a concurrent compile. A hit here replaces the miss
    /// already recorded; another miss is not counted twice.
    pub fn recheck(&self, key: &ViewKey) -> Option<V> {
        let mut inner = self.lock();
        let value = inner.entries.get(key).cloned()?;
        inner.misses = inner.misses.saturating_sub(1);
        inner.hits += 1;
        Some(value)
    }

    /// Store a compiled view, evicting the least recently used one when full.
    pub fn put(&self, key: ViewKey, value: V) {
        let mut inner = self.lock();
        if let Some(evicted) = inner.entries.put(key, value) {
            inner.evictions += 1;
            tracing::debug!("Evicted compiled view '{}' from cache", evicted);
        }
    }

    /// Drop every entry that uses `page`, either as the page or as its
    /// layout. Returns how many entries were removed.
    pub fn invalidate(&self, page: &PageKey) -> usize {
        let mut inner = self.lock();
        let stale: Vec<ViewKey> = inner
            .entries
            .keys()
            .filter(|key| key.page == *page || key.layout.as_ref() == Some(page))
            .cloned()
            .collect();
        for key in &stale {
            inner.entries.remove(key);
        }
        stale.len()
    }

    /// Drop every entry and reset the statistics.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.hits = 0;
        inner.misses = 0;
        inner.evictions = 0;
    }

    #[must_use]
    pub fn contains(&self, key: &ViewKey) -> bool {
        self.lock().entries.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            entries: inner.entries.len(),
            capacity: inner.entries.capacity(),
        }
    }

    // The guarded data stays consistent even if a holder panicked, since every
    // critical section is a single map operation.
    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
