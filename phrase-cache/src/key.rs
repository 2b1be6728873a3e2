//! Cache keys identifying logical API requests.
//!
//! A key is the request method immediately followed by the request path and,
//! when present, the query string:
//!
//! ```
//! use http::Method;
//! use phrase_cache::CacheKey;
//!
//! let key = CacheKey::from_request(
//!     &Method::GET,
//!     "/api/v2/projects/p1/locales",
//!     Some("branch=feature"),
//! );
//! assert_eq!(key.as_str(), "GET/api/v2/projects/p1/locales?branch=feature");
//!
//! let key = CacheKey::from_request(&Method::GET, "/api/v2/projects", None);
//! assert_eq!(key.to_string(), "GET/api/v2/projects");
//! ```
//!
//! The host is never part of the key. Callers pass the already percent-encoded
//! path and query of the outgoing URL, so user supplied identifiers cannot
//! introduce a `/`, `?` or `&` that would make two different requests collide.
//! The same key is derived twice per call: once by the endpoint that processes
//! the response and once by the middleware that attaches `If-None-Match`.

use std::fmt;

use http::Method;
use smol_str::SmolStr;

/// Opaque key shared by the ETag store and the response cache.
///
/// Backed by [`SmolStr`], so cloning a key never copies its content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(SmolStr);

impl CacheKey {
    /// Creates a key from an arbitrary string.
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self(key.into())
    }

    /// Derives the key of a request from its method, path and query.
    ///
    /// An empty query is treated the same as no query at all.
    pub fn from_request(method: &Method, path: &str, query: Option<&str>) -> Self {
        let query = query.filter(|query| !query.is_empty());
        let mut key = String::with_capacity(
            method.as_str().len() + path.len() + query.map_or(0, |q| q.len() + 1),
        );
        key.push_str(method.as_str());
        key.push_str(path);
        if let Some(query) = query {
            key.push('?');
            key.push_str(query);
        }
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_dropped() {
        let with_empty = CacheKey::from_request(&Method::GET, "/api/v2/projects", Some(""));
        let without = CacheKey::from_request(&Method::GET, "/api/v2/projects", None);
        assert_eq!(with_empty, without);
        assert_eq!(without.as_str(), "GET/api/v2/projects");
    }

    #[test]
    fn test_method_is_significant() {
        let get = CacheKey::from_request(&Method::GET, "/api/v2/projects", None);
        let post = CacheKey::from_request(&Method::POST, "/api/v2/projects", None);
        assert_ne!(get, post);
    }

    #[test]
    fn test_filters_are_significant() {
        let tag1 = CacheKey::from_request(&Method::GET, "/download", Some("tags=tag1"));
        let tag2 = CacheKey::from_request(&Method::GET, "/download", Some("tags=tag2"));
        let untagged = CacheKey::from_request(&Method::GET, "/download", None);
        assert_ne!(tag1, tag2);
        assert_ne!(tag1, untagged);
    }

    #[test]
    fn test_from_string_matches_derived_key() {
        let derived = CacheKey::from_request(&Method::DELETE, "/api/v2/projects/p1", None);
        assert_eq!(derived, CacheKey::from("DELETE/api/v2/projects/p1"));
    }
}
