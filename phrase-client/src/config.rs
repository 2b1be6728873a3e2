//! Client configuration.

use phrase_cache::CacheConfig;
use serde::{Deserialize, Serialize};

/// Base URL of the hosted Phrase API.
pub const DEFAULT_BASE_URL: &str = "https://api.phrase.com";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

/// Settings of a [`PhraseApiClient`](crate::PhraseApiClient), fixed for its
/// lifetime.
///
/// ```
/// use phrase_client::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{
///     "auth_key": "secret",
///     "cache": { "etag_ttl": "1h" }
/// }"#).unwrap();
///
/// assert_eq!(config.base_url, "https://api.phrase.com");
/// assert_eq!(config.cache.etag_ttl.as_secs(), 3600);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host of the API, without the `/api/v2` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token sent as `Authorization: token <auth_key>`.
    pub auth_key: String,

    /// Lifetimes and capacity of the response caches.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl ClientConfig {
    /// Config for the hosted API with default cache settings.
    pub fn new(auth_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            auth_key: auth_key.into(),
            cache: CacheConfig::default(),
        }
    }

    /// Replaces the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the cache settings.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}
