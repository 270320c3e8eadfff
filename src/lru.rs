//! LRU frequency cache for cross-document deduplication
//!
//! [`DuplicateCache`] counts how often a text has been emitted during a run.
//! Text that keeps reappearing verbatim on many pages (cookie notices, author
//! boxes, newsletter prompts) is boilerplate even when it sits inside an
//! otherwise good content region.
//!
//! One cache is shared by every document of a run. It is internally locked, so a
//! single instance can be handed to parallel workers behind an `Arc`. Only texts
//! of at least `min_len` characters are tracked.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::{Mutex, MutexGuard};

/// Default minimum tracked text length (characters).
pub const DEFAULT_MIN_DUPLCHECK_SIZE: usize = 100;

/// Run-scoped duplicate text counter.
///
/// # Example
///
/// ```rust
/// use rs_textract::DuplicateCache;
///
/// let cache = DuplicateCache::with_min_len(100, 5);
/// cache.observe("Subscribe to our newsletter");
/// cache.observe("Subscribe to our newsletter");
/// assert_eq!(cache.count("Subscribe to our newsletter"), 2);
/// // Too short to be diagnostic
/// cache.observe("OK");
/// assert_eq!(cache.count("OK"), 0);
/// ```
#[derive(Debug)]
pub struct DuplicateCache {
    inner: Mutex<LruCache<String, usize>>,
    min_len: usize,
}

impl DuplicateCache {
    /// Create a cache holding at most `capacity` distinct texts.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_min_len(capacity, DEFAULT_MIN_DUPLCHECK_SIZE)
    }

    /// Create a cache that ignores texts shorter than `min_len` characters.
    #[must_use]
    pub fn with_min_len(capacity: usize, min_len: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        // Grow on demand instead of allocating the full capacity up front.
        let mut inner = LruCache::unbounded();
        inner.resize(capacity);
        Self {
            inner: Mutex::new(inner),
            min_len,
        }
    }

    /// Create a cache sized from extraction options.
    #[must_use]
    pub fn from_options(opts: &crate::Options) -> Self {
        Self::with_min_len(opts.dedup_cache_size, opts.min_duplcheck_size)
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, usize>> {
        self.inner.lock()
    }

    /// Whether `text` is long enough to be tracked.
    #[must_use]
    pub fn is_tracked(&self, text: &str) -> bool {
        text.chars().count() >= self.min_len
    }

    /// Record one occurrence of `text` and return its new count.
    ///
    /// Returns 0 for texts too short to be tracked.
    pub fn observe(&self, text: &str) -> usize {
        if !self.is_tracked(text) {
            return 0;
        }
        let mut inner = self.lock();
        if let Some(count) = inner.get_mut(text) {
            *count += 1;
            return *count;
        }
        inner.put(text.to_string(), 1);
        1
    }

    /// Number of recorded occurrences of `text` (0 if absent).
    ///
    /// Lookups do not refresh recency.
    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        if !self.is_tracked(text) {
            return 0;
        }
        self.lock().peek(text).copied().unwrap_or(0)
    }

    /// Number of distinct texts currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every recorded text.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for DuplicateCache {
    fn default() -> Self {
        Self::from_options(&crate::Options::default())
    }
}
