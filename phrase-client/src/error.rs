//! Error types of the Phrase API client.

use phrase_cache::CacheKey;
use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T, E = PhraseError> = std::result::Result<T, E>;

/// Errors returned by [`PhraseApiClient`](crate::PhraseApiClient) calls.
///
/// None of them is retried. Errors raised before a response was received
/// arrive as [`Transport`](PhraseError::Transport); the server rejecting a
/// request is [`Api`](PhraseError::Api); everything else means the response
/// did not match what the client expected.
#[derive(Debug, Error)]
pub enum PhraseError {
    /// The request could not be sent or the response could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest_middleware::Error),

    /// The server answered with a status outside `200..400`.
    #[error("Code [{status}] : {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        message: String,
    },

    /// A fresh response carried no `Content-Type` header.
    #[error("Content type is missing")]
    MissingContentType,

    /// A fresh response declared a content type the client cannot decode.
    #[error("Content type {0} is not supported")]
    UnsupportedContentType(String),

    /// A fresh response had no readable body.
    #[error("Response body is missing")]
    MissingBody,

    /// The JSON body did not match the expected shape.
    #[error("Error during parsing response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The decoded payload was bytes where an object was expected, or the
    /// other way around.
    #[error("Expected {expected} payload, got {found}")]
    UnexpectedPayload {
        /// What the endpoint expected.
        expected: &'static str,
        /// What the response contained.
        found: &'static str,
    },

    /// The server answered 304 but no cached response exists for the key.
    #[error("Response for {key} is not modified but no cached response is available")]
    RevalidationMiss {
        /// Key of the revalidated request.
        key: CacheKey,
    },

    /// The cached response for the key holds a different type.
    #[error("Cached response for {key} holds {found}, expected {expected}")]
    CachedTypeMismatch {
        /// Key of the revalidated request.
        key: CacheKey,
        /// Type requested by the endpoint.
        expected: &'static str,
        /// Type stored in the cache.
        found: &'static str,
    },

    /// A request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured base URL cannot be used.
    #[error("Invalid base url {url}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The auth key contains bytes not allowed in a header.
    #[error("Invalid auth key: {0}")]
    InvalidAuthKey(#[from] http::header::InvalidHeaderValue),
}

impl PhraseError {
    /// Status code reported by the server, for [`Api`](PhraseError::Api) errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
