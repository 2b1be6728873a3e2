#![warn(missing_docs)]
//! # phrase-client
//!
//! Typed async client for the [Phrase](https://phrase.com) localization API v2.
//!
//! Reads are revalidated with ETags: the first response of a request is
//! decoded and cached together with its `ETag`, later identical requests
//! carry `If-None-Match`, and a `304 Not Modified` answer is served from the
//! cache instead of being decoded again.
//!
//! The pieces, in the order a call goes through them:
//!
//! - [`PhraseApiClient`] builds the URL and derives the [`CacheKey`] with
//!   [`request_key`];
//! - [`ConditionalRequestMiddleware`] adds `If-None-Match` and `Authorization`
//!   on the way out;
//! - [`ResponseProcessor`] classifies the [`RawResponse`], serves `304` from
//!   the cache or decodes the body with [`decode`] and records the result.
//!
//! Failures are reported as [`PhraseError`] and never retried.

mod client;
mod config;
mod content;
mod error;
mod middleware;
pub mod model;
mod processor;

pub use client::{NoConfig, PhraseApiClient, PhraseApiClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use content::{ContentKind, DecodedPayload, decode};
pub use error::{PhraseError, Result};
pub use middleware::{ConditionalRequestMiddleware, request_key};
pub use processor::{RawResponse, ResponseProcessor};

pub use phrase_cache::{CacheConfig, CacheKey, Caches};
