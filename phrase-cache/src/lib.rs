#![warn(missing_docs)]
//! # phrase-cache
//!
//! In-memory caches backing conditional requests of the Phrase API client.
//!
//! - [`EtagStore`] maps a request to the ETag of its last fresh response.
//! - [`ResponseCache`] maps a request to the decoded body of that response.
//! - [`Sweeper`] periodically purges expired entries of both.
//!
//! Entries expire a fixed time after their last write. Reads do not extend
//! their lifetime, and an expired entry is never returned even if it has not
//! been purged yet. Both stores are built on Moka's concurrent cache, so
//! concurrent calls for different keys never block each other.

pub mod caches;
pub mod config;
pub mod key;
pub mod payload;
pub mod store;
pub mod sweeper;

pub use caches::Caches;
pub use config::{CacheConfig, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
pub use key::CacheKey;
pub use payload::CachedPayload;
pub use store::{EtagStore, ExpiringStore, ResponseCache};
pub use sweeper::{Sweep, Sweeper};
