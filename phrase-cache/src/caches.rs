//! The pair of stores owned by one client.

use crate::config::CacheConfig;
use crate::store::{EtagStore, ResponseCache};
use crate::sweeper::{Sweep, Sweeper};

/// ETag store and response cache of a single client instance.
///
/// Both stores use the same [`CacheKey`](crate::CacheKey) for a given
/// request but expire independently. Clones share storage, so the middleware
/// that reads ETags and the processor that writes them see the same entries.
#[derive(Clone, Debug)]
pub struct Caches {
    etags: EtagStore,
    responses: ResponseCache,
}

impl Caches {
    /// Creates empty stores sized and timed according to `config`.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            etags: EtagStore::new("etags", config.etag_ttl, config.max_entries),
            responses: ResponseCache::new("responses", config.response_ttl, config.max_entries),
        }
    }

    /// ETag validators of previously decoded responses.
    pub fn etags(&self) -> &EtagStore {
        &self.etags
    }

    /// Previously decoded responses.
    pub fn responses(&self) -> &ResponseCache {
        &self.responses
    }

    /// Drops every entry of both stores.
    pub fn clear(&self) {
        self.etags.clear();
        self.responses.clear();
    }

    /// Starts a background sweep of both stores.
    ///
    /// See [`Sweeper::spawn`] for when no task is started.
    pub fn spawn_sweeper(&self, config: &CacheConfig) -> Option<Sweeper> {
        let targets: Vec<Box<dyn Sweep>> =
            vec![Box::new(self.etags.clone()), Box::new(self.responses.clone())];
        Sweeper::spawn(targets, config.sweep_interval)
    }
}
