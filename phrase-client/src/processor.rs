//! Turning raw responses into typed results while maintaining the caches.
//!
//! Every endpoint hands its response to [`ResponseProcessor::process`]
//! together with the [`CacheKey`] of the request. The processor then takes
//! exactly one of three paths:
//!
//! 1. a status outside `200..400` becomes [`PhraseError::Api`] and leaves the
//!    caches alone;
//! 2. `304 Not Modified` returns the payload cached for the key;
//! 3. any other status decodes the body by content type and, when the
//!    response carries an `ETag`, stores both the validator and the payload.

use std::any::{Any, type_name};
use std::ops::Range;

use bytes::Bytes;
use http::header::ETAG;
use http::{HeaderMap, StatusCode};
use phrase_cache::{CacheKey, CachedPayload, Caches};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::content::{self, DecodedPayload};
use crate::error::{PhraseError, Result};

const ACCEPTED: Range<u16> = 200..400;

const NO_BODY: &str = "no response body";

/// Status, headers and body of a received response.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers; lookups are case-insensitive.
    pub headers: HeaderMap,
    /// Response body, `None` when it was absent or unreadable.
    pub body: Option<Bytes>,
}

impl RawResponse {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Reads the whole response.
    ///
    /// A body that fails to arrive is tolerated for error statuses, whose
    /// message then falls back to a placeholder. For accepted statuses it is
    /// a transport error.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(body) => Some(body),
            Err(error) if !is_accepted(status) => {
                debug!(%status, %error, "Failed to read error response body");
                None
            }
            Err(error) => return Err(PhraseError::Transport(error.into())),
        };
        Ok(Self::new(status, headers, body))
    }

    /// Value of the `ETag` header, if present and printable.
    pub fn etag(&self) -> Option<&str> {
        self.headers.get(ETAG).and_then(|value| value.to_str().ok())
    }

    fn message(&self) -> String {
        match self.body.as_deref() {
            Some(body) if !body.is_empty() => String::from_utf8_lossy(body).into_owned(),
            _ => NO_BODY.to_owned(),
        }
    }
}

fn is_accepted(status: StatusCode) -> bool {
    ACCEPTED.contains(&status.as_u16())
}

/// Classifies responses, serves `304` from the cache and records fresh
/// payloads with their ETags.
///
/// The processor owns a handle to the client's [`Caches`]; clones share them.
#[derive(Clone, Debug)]
pub struct ResponseProcessor {
    caches: Caches,
}

impl ResponseProcessor {
    /// Creates a processor writing to `caches`.
    pub fn new(caches: Caches) -> Self {
        Self { caches }
    }

    /// The caches this processor reads and writes.
    pub fn caches(&self) -> &Caches {
        &self.caches
    }

    /// Fails with [`PhraseError::Api`] unless the status is in `200..400`.
    ///
    /// Used on its own by endpoints that only care about the status, such as
    /// deletes answering `204 No Content`.
    pub fn check_status(&self, key: &CacheKey, response: &RawResponse) -> Result<()> {
        if is_accepted(response.status) {
            return Ok(());
        }
        let message = response.message();
        warn!(
            key = %key,
            status = %response.status,
            headers = ?response.headers,
            body = %message,
            "Phrase API rejected the request"
        );
        Err(PhraseError::Api {
            status: response.status.as_u16(),
            message,
        })
    }

    /// Resolves `response` to a payload of type `T`.
    pub fn process<T>(&self, key: &CacheKey, response: RawResponse) -> Result<DecodedPayload<T>>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        debug!(
            key = %key,
            status = %response.status,
            headers = ?response.headers,
            "Processing response"
        );
        self.check_status(key, &response)?;

        if response.status == StatusCode::NOT_MODIFIED {
            return self.cached(key);
        }

        let etag = response.etag().map(str::to_owned);
        let body = response.body.ok_or(PhraseError::MissingBody)?;
        let payload = content::decode::<T>(&response.headers, body)?;

        match etag {
            Some(etag) => {
                // A reader racing this insert sees at worst a validator
                // without a payload, which is a miss, never a stale object.
                self.caches.etags().insert(key.clone(), etag.as_str());
                self.caches.responses().insert(key.clone(), to_cached(&payload));
                debug!(key = %key, etag = %etag, "Cached fresh response");
            }
            None => debug!(key = %key, "Response has no ETag, not caching"),
        }
        Ok(payload)
    }

    fn cached<T>(&self, key: &CacheKey) -> Result<DecodedPayload<T>>
    where
        T: Any + Clone,
    {
        let Some(cached) = self.caches.responses().get(key) else {
            // Without its payload the validator only earns more 304s.
            self.caches.etags().remove(key);
            warn!(key = %key, "Not modified but nothing cached, dropped ETag");
            return Err(PhraseError::RevalidationMiss { key: key.clone() });
        };
        debug!(key = %key, payload = ?cached, "Serving cached response");

        if let Some(body) = cached.as_bytes() {
            return Ok(DecodedPayload::Bytes(body.clone()));
        }
        cached
            .downcast::<T>()
            .map(DecodedPayload::Object)
            .ok_or_else(|| PhraseError::CachedTypeMismatch {
                key: key.clone(),
                expected: type_name::<T>(),
                found: cached.type_name(),
            })
    }
}

fn to_cached<T>(payload: &DecodedPayload<T>) -> CachedPayload
where
    T: Clone + Send + Sync + 'static,
{
    match payload {
        DecodedPayload::Object(value) => CachedPayload::object(value.clone()),
        DecodedPayload::Bytes(body) => CachedPayload::Bytes(body.clone()),
    }
}
