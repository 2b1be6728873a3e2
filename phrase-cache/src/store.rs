//! Expiring key-value stores backed by Moka.

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;
use smol_str::SmolStr;

use crate::key::CacheKey;
use crate::payload::CachedPayload;
use crate::sweeper::Sweep;

/// Expiration policy measured from the last write.
///
/// Reads never extend the lifetime of an entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct WriteExpiry {
    ttl: Duration,
}

impl<V> Expiry<CacheKey, V> for WriteExpiry {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        _value: &V,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(self.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        _value: &V,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // Moka keeps the previous deadline by default; an overwrite must
        // restart the clock.
        Some(self.ttl)
    }
}

/// Thread-safe map from [`CacheKey`] to `V` whose entries expire a fixed
/// time after they were written.
///
/// Expired entries are never returned, whether or not they were purged yet.
/// Purging happens lazily during other operations and on every
/// [`Sweep::sweep`]. Clones share the same underlying storage.
///
/// ```
/// use std::time::Duration;
/// use phrase_cache::{CacheKey, EtagStore};
///
/// let etags = EtagStore::new("etags", Duration::from_secs(60), None);
/// let key = CacheKey::from("GET/api/v2/projects");
/// etags.insert(key.clone(), "\"abc\"");
/// assert_eq!(etags.get(&key).as_deref(), Some("\"abc\""));
/// ```
#[derive(Clone)]
pub struct ExpiringStore<V> {
    cache: Cache<CacheKey, V>,
    ttl: Duration,
    label: &'static str,
}

/// ETag validators keyed by request.
pub type EtagStore = ExpiringStore<SmolStr>;

/// Decoded responses keyed by request.
pub type ResponseCache = ExpiringStore<CachedPayload>;

impl<V> ExpiringStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a store whose entries live for `ttl` each.
    ///
    /// Without `max_entries` the store is unbounded and entries leave only
    /// by expiry or removal. With it, Moka evicts live entries once the
    /// bound is reached. The label names the store in logs.
    pub fn new(label: &'static str, ttl: Duration, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder()
            .name(label)
            .expire_after(WriteExpiry { ttl });
        if let Some(max_entries) = max_entries {
            builder = builder.max_capacity(max_entries);
        }
        Self {
            cache: builder.build(),
            ttl,
            label,
        }
    }

    /// Inserts or overwrites the entry for `key` and restarts its expiry clock.
    pub fn insert(&self, key: CacheKey, value: impl Into<V>) {
        self.cache.insert(key, value.into());
    }

    /// Returns the live entry for `key`.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.cache.get(key)
    }

    /// Removes the entry for `key`, returning it if it was live.
    pub fn remove(&self, key: &CacheKey) -> Option<V> {
        self.cache.remove(key)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Approximate number of stored entries, including expired ones that
    /// were not purged yet.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Lifetime of an entry after its last write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Name of this store in logs.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<V> Sweep for ExpiringStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn label(&self) -> &'static str {
        self.label
    }

    fn sweep(&self) {
        self.cache.run_pending_tasks();
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl<V> std::fmt::Debug for ExpiringStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringStore")
            .field("label", &self.label)
            .field("ttl", &self.ttl)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
