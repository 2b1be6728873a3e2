//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lifetime of both ETags and cached responses: one day.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default period between two sweeps of expired entries.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// TTLs, capacity and sweep schedule of the ETag store and response cache.
///
/// Durations are written in humantime notation (`"24h"`, `"90s"`, `"500ms"`).
///
/// ```
/// use std::time::Duration;
/// use phrase_cache::CacheConfig;
///
/// let config: CacheConfig = serde_json::from_str(r#"{"response_ttl": "1h"}"#).unwrap();
/// assert_eq!(config.response_ttl, Duration::from_secs(3600));
/// assert_eq!(config.etag_ttl, phrase_cache::DEFAULT_TTL);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a decoded response stays cached after it was written.
    #[serde(with = "humantime_serde")]
    pub response_ttl: Duration,
    /// How long an ETag stays on file after it was written.
    #[serde(with = "humantime_serde")]
    pub etag_ttl: Duration,
    /// Period of the background sweep. Zero disables the sweep.
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
    /// Optional bound on the entries of each store.
    ///
    /// Unbounded by default. A bound evicts live entries under pressure, and
    /// each store evicts on its own.
    pub max_entries: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            response_ttl: DEFAULT_TTL,
            etag_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            max_entries: None,
        }
    }
}
