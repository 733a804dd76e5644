//! Page caching infrastructure.
//!
//! Provides a trait for page caching and implementations:
//! - [`PageCache`]: Trait for cache implementations
//! - [`NullPageCache`]: No-op cache (disabled caching)
//! - [`LruPageCache`]: Bounded in-memory cache with least-recently-used eviction

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use qalam_config::Lang;

/// Cache key: content path and language.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Path without language suffix (e.g. `about`, `blogs/hello`).
    pub path: String,
    pub lang: Lang,
}

impl CacheKey {
    #[must_use]
    pub fn new(path: impl Into<String>, lang: Lang) -> Self {
        Self {
            path: path.into(),
            lang,
        }
    }
}

/// Result of a content fetch, cached for the lifetime of the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedPage {
    /// Raw Markdown document.
    Found(String),
    /// The fetch failed. Not retried.
    NotFound,
}

/// Trait for page caching implementations.
pub trait PageCache: Send + Sync {
    /// Retrieve a cached fetch result.
    fn get(&self, key: &CacheKey) -> Option<CachedPage>;

    /// Store a fetch result, replacing any previous value for the key.
    fn insert(&self, key: CacheKey, page: CachedPage);

    /// Number of cached entries.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// No-op cache implementation.
///
/// Always returns cache misses and discards stored content.
#[derive(Debug, Default)]
pub struct NullPageCache;

impl PageCache for NullPageCache {
    fn get(&self, _key: &CacheKey) -> Option<CachedPage> {
        None
    }

    fn insert(&self, _key: CacheKey, _page: CachedPage) {}

    fn len(&self) -> usize {
        0
    }
}

/// In-memory cache bounded to `capacity` entries.
///
/// Hits and inserts refresh an entry; when full, the least recently used
/// entry is evicted.
#[derive(Debug)]
pub struct LruPageCache {
    inner: Mutex<LruCache<CacheKey, CachedPage>>,
}

impl LruPageCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries().cap().get()
    }

    fn entries(&self) -> MutexGuard<'_, LruCache<CacheKey, CachedPage>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PageCache for LruPageCache {
    fn get(&self, key: &CacheKey) -> Option<CachedPage> {
        self.entries().get(key).cloned()
    }

    fn insert(&self, key: CacheKey, page: CachedPage) {
        let mut entries = self.entries();
        let replacing = entries.contains(&key);
        if let Some((old, _)) = entries.push(key, page)
            && !replacing
        {
            tracing::debug!(path = %old.path, lang = %old.lang, "Evicted cached page");
        }
    }

    fn len(&self) -> usize {
        self.entries().len()
    }
}
