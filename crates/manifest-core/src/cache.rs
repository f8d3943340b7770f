//! TTL response cache with an injectable clock.
//!
//! Identical prompts within the TTL are answered from memory instead of
//! calling the completion backend again. The cache is an explicit object
//! owned by whoever composes the engine; there is no process-wide state.
//!
//! The lock is a `std::sync::Mutex` and is never held across an await.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::completion::{CompletionPrompt, TextCompletion};
use crate::error::CompletionError;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. For tests.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    /// Clock frozen at the moment of creation.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = Duration::from_millis(self.offset_ms.load(Ordering::SeqCst));
        self.origin.checked_add(offset).unwrap_or(self.origin)
    }
}

impl<C: Clock> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    inserted_at: Instant,
}

/// Bounded map from prompt key to response text with per-entry expiry.
#[derive(Debug)]
pub struct ResponseCache<K: Clock = SystemClock> {
    ttl: Duration,
    max_entries: usize,
    clock: K,
    entries: Mutex<BTreeMap<String, CacheEntry>>,
}

impl ResponseCache<SystemClock> {
    /// Cache on the wall clock.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, SystemClock)
    }
}

impl<K: Clock> ResponseCache<K> {
    /// Cache on an explicit clock.
    pub fn with_clock(ttl: Duration, max_entries: usize, clock: K) -> Self {
        Self {
            ttl,
            max_entries,
            clock,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Live value for `key`; an expired entry is dropped and misses.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => self.is_expired(entry, now),
        };
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|e| e.value.clone())
    }

    /// Store `value`, evicting expired entries and then the oldest if full.
    pub fn insert(&self, key: String, value: String) {
        if self.max_entries == 0 {
            return;
        }
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, e| !self.is_expired(e, now));

        while entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    entries.remove(&k);
                }
                None => break,
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Entries currently stored, expired or not.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) >= self.ttl
    }
}

/// A completion answer and whether it came from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Narrative text, never blank.
    pub text: String,
    /// `true` when served from the cache.
    pub cached: bool,
}

/// A [`TextCompletion`] fronted by a [`ResponseCache`].
///
/// Only successful, non-blank answers are cached.
#[derive(Debug)]
pub struct CachedCompletion<C, K: Clock = SystemClock> {
    inner: C,
    cache: ResponseCache<K>,
}

impl<C: TextCompletion, K: Clock> CachedCompletion<C, K> {
    /// Wrap `inner` with `cache`.
    pub const fn new(inner: C, cache: ResponseCache<K>) -> Self {
        Self { inner, cache }
    }

    /// The wrapped backend.
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// The cache.
    pub const fn cache(&self) -> &ResponseCache<K> {
        &self.cache
    }

    /// Answer from the cache, or call the backend and remember the answer.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or [`CompletionError::Empty`] when it
    /// answered with blank text.
    pub async fn complete_cached(
        &self,
        prompt: &CompletionPrompt,
    ) -> Result<Completion, CompletionError> {
        let key = prompt.cache_key();
        if let Some(text) = self.cache.get(&key) {
            debug!(backend = self.inner.name(), "completion served from cache");
            return Ok(Completion { text, cached: true });
        }

        let text = self.inner.complete(prompt).await?;
        if text.trim().is_empty() {
            return Err(CompletionError::Empty);
        }
        self.cache.insert(key, text.clone());
        Ok(Completion {
            text,
            cached: false,
        })
    }
}

impl<C: TextCompletion, K: Clock> TextCompletion for CachedCompletion<C, K> {
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        self.complete_cached(prompt).await.map(|c| c.text)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn cache(ttl_secs: u64, max: usize) -> (Arc<ManualClock>, ResponseCache<Arc<ManualClock>>) {
        let clock = Arc::new(ManualClock::new());
        let cache =
            ResponseCache::with_clock(Duration::from_secs(ttl_secs), max, Arc::clone(&clock));
        (clock, cache)
    }

    // -----------------------------------------------------------------------
    // Expiry and eviction
    // -----------------------------------------------------------------------

    #[test]
    fn entry_expires_after_ttl() {
        let (clock, cache) = cache(60, 8);
        cache.insert("k".to_owned(), "v".to_owned());

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("k").as_deref(), Some("v"));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_evicts_oldest() {
        let (clock, cache) = cache(300, 2);
        cache.insert("a".to_owned(), "1".to_owned());
        clock.advance(Duration::from_secs(1));
        cache.insert("b".to_owned(), "2".to_owned());
        clock.advance(Duration::from_secs(1));
        cache.insert("c".to_owned(), "3".to_owned());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("c").as_deref(), Some("3"));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let (_, cache) = cache(300, 0);
        cache.insert("a".to_owned(), "1".to_owned());
        assert!(cache.is_empty());
    }

    #[test]
    fn overwrite_does_not_evict() {
        let (_, cache) = cache(300, 1);
        cache.insert("a".to_owned(), "1".to_owned());
        cache.insert("a".to_owned(), "2".to_owned());
        assert_eq!(cache.get("a").as_deref(), Some("2"));
    }

    // -----------------------------------------------------------------------
    // Cached completion
    // -----------------------------------------------------------------------

    struct Counting {
        calls: AtomicUsize,
        reply: &'static str,
    }

    impl TextCompletion for Counting {
        async fn complete(&self, _prompt: &CompletionPrompt) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_owned())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn prompt() -> CompletionPrompt {
        CompletionPrompt {
            system: "sys".to_owned(),
            user: "hello".to_owned(),
        }
    }

    #[tokio::test]
    async fn second_identical_prompt_is_cached() {
        let (clock, cache) = cache(60, 8);
        let completion = CachedCompletion::new(
            Counting {
                calls: AtomicUsize::new(0),
                reply: "hi there",
            },
            cache,
        );

        let first = completion.complete_cached(&prompt()).await;
        let second = completion.complete_cached(&prompt()).await;
        assert_eq!(first.map(|c| c.cached), Ok(false));
        assert_eq!(second.map(|c| c.cached), Ok(true));
        assert_eq!(completion.inner().calls.load(Ordering::SeqCst), 1);

        clock.advance(Duration::from_secs(61));
        let third = completion.complete_cached(&prompt()).await;
        assert_eq!(third.map(|c| c.cached), Ok(false));
        assert_eq!(completion.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn blank_reply_is_an_error_and_not_cached() {
        let (_, cache) = cache(60, 8);
        let completion = CachedCompletion::new(
            Counting {
                calls: AtomicUsize::new(0),
                reply: "   ",
            },
            cache,
        );
        assert_eq!(
            completion.complete_cached(&prompt()).await,
            Err(CompletionError::Empty)
        );
        assert!(completion.cache().is_empty());
    }
}
