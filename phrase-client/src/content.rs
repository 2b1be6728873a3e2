//! Decoding of fresh response bodies by content type.

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PhraseError, Result};

/// Body formats the client knows how to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    /// `application/json`, any `*/json` and any `+json` suffix.
    Json,
    /// `application/octet-stream`.
    OctetStream,
    /// `text/plain`.
    PlainText,
}

impl ContentKind {
    /// Classifies a `Content-Type` header value.
    ///
    /// Parameters such as `charset` are ignored and matching is
    /// case-insensitive. Returns `None` for media types the client does not
    /// decode.
    ///
    /// ```
    /// use phrase_client::ContentKind;
    ///
    /// assert_eq!(
    ///     ContentKind::from_content_type("application/json; charset=utf-8"),
    ///     Some(ContentKind::Json)
    /// );
    /// assert_eq!(
    ///     ContentKind::from_content_type("application/vnd.api+json"),
    ///     Some(ContentKind::Json)
    /// );
    /// assert_eq!(ContentKind::from_content_type("Text/Plain"), Some(ContentKind::PlainText));
    /// assert_eq!(ContentKind::from_content_type("application/xml"), None);
    /// ```
    pub fn from_content_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        let (kind, subtype) = essence.split_once('/')?;
        let kind = kind.trim().to_ascii_lowercase();
        let subtype = subtype.trim().to_ascii_lowercase();

        if subtype == "json" || subtype.ends_with("+json") {
            return Some(Self::Json);
        }
        match (kind.as_str(), subtype.as_str()) {
            ("application", "octet-stream") => Some(Self::OctetStream),
            ("text", "plain") => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// A fresh response body after decoding.
///
/// Whether a body becomes an object or raw bytes depends only on its content
/// type, never on the type the caller asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedPayload<T> {
    /// A JSON body deserialized into `T`.
    Object(T),
    /// A binary or plain-text body, byte for byte.
    Bytes(Bytes),
}

impl<T> DecodedPayload<T> {
    /// Returns the decoded object, failing for raw bodies.
    pub fn into_object(self) -> Result<T> {
        match self {
            Self::Object(value) => Ok(value),
            Self::Bytes(_) => Err(PhraseError::UnexpectedPayload {
                expected: "object",
                found: "bytes",
            }),
        }
    }

    /// Returns the raw body, failing for decoded objects.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            Self::Bytes(body) => Ok(body),
            Self::Object(_) => Err(PhraseError::UnexpectedPayload {
                expected: "bytes",
                found: "object",
            }),
        }
    }
}

/// Decodes `body` according to the `Content-Type` in `headers`.
pub fn decode<T>(headers: &HeaderMap, body: Bytes) -> Result<DecodedPayload<T>>
where
    T: DeserializeOwned,
{
    let content_type = headers
        .get(CONTENT_TYPE)
        .ok_or(PhraseError::MissingContentType)?;
    let content_type = content_type
        .to_str()
        .map_err(|_| PhraseError::UnsupportedContentType(format!("{content_type:?}")))?;

    match ContentKind::from_content_type(content_type) {
        Some(ContentKind::Json) => {
            let value = serde_json::from_slice(&body).map_err(|error| {
                debug!(%error, content_type, "Response body does not match the expected type");
                PhraseError::Decode(error)
            })?;
            Ok(DecodedPayload::Object(value))
        }
        Some(ContentKind::OctetStream | ContentKind::PlainText) => Ok(DecodedPayload::Bytes(body)),
        None => Err(PhraseError::UnsupportedContentType(content_type.to_owned())),
    }
}
