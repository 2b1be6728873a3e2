//! Request middleware adding conditional and authorization headers.

use async_trait::async_trait;
use http::header::{AUTHORIZATION, IF_NONE_MATCH, InvalidHeaderValue};
use http::{Extensions, HeaderMap, HeaderValue, Method};
use phrase_cache::{CacheKey, EtagStore};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use tracing::debug;
use url::Url;

/// Derives the cache key of a request from its method and URL.
///
/// Endpoints and [`ConditionalRequestMiddleware`] both go through this
/// function, so the key under which a response is cached is the key the
/// middleware later looks up.
///
/// ```
/// use http::Method;
/// use phrase_client::request_key;
/// use url::Url;
///
/// let url = Url::parse("https://api.phrase.com/api/v2/projects/p%2F1/locales?branch=b1").unwrap();
/// assert_eq!(
///     request_key(&Method::GET, &url).as_str(),
///     "GET/api/v2/projects/p%2F1/locales?branch=b1"
/// );
/// ```
pub fn request_key(method: &Method, url: &Url) -> CacheKey {
    CacheKey::from_request(method, url.path(), url.query())
}

/// Adds `If-None-Match` for requests with an ETag on file and
/// `Authorization: token <auth_key>` to every request.
///
/// Request bodies are never touched.
#[derive(Clone)]
pub struct ConditionalRequestMiddleware {
    etags: EtagStore,
    authorization: HeaderValue,
}

impl ConditionalRequestMiddleware {
    /// Creates a middleware reading validators from `etags`.
    ///
    /// Fails if the auth key cannot be sent in a header.
    pub fn new(etags: EtagStore, auth_key: &str) -> Result<Self, InvalidHeaderValue> {
        let mut authorization = HeaderValue::from_str(&format!("token {auth_key}"))?;
        authorization.set_sensitive(true);
        Ok(Self {
            etags,
            authorization,
        })
    }

    /// Adds the headers for the request identified by `key`.
    pub fn apply(&self, key: &CacheKey, headers: &mut HeaderMap) {
        let etag = self
            .etags
            .get(key)
            .and_then(|etag| HeaderValue::from_str(&etag).ok());
        match etag {
            Some(etag) => {
                debug!(key = %key, etag = ?etag, "Revalidating with stored ETag");
                headers.insert(IF_NONE_MATCH, etag);
            }
            None => debug!(key = %key, "No ETag on file"),
        }
        headers.insert(AUTHORIZATION, self.authorization.clone());
    }
}

impl std::fmt::Debug for ConditionalRequestMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionalRequestMiddleware")
            .field("etags", &self.etags)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Middleware for ConditionalRequestMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let key = request_key(req.method(), req.url());
        self.apply(&key, req.headers_mut());
        next.run(req, extensions).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn middleware() -> ConditionalRequestMiddleware {
        let etags = EtagStore::new("etags", Duration::from_secs(60), None);
        ConditionalRequestMiddleware::new(etags, "secret").unwrap()
    }

    #[test]
    fn test_adds_if_none_match_when_etag_is_stored() {
        let middleware = middleware();
        let key = CacheKey::from("GET/api/v2/projects");
        middleware.etags.insert(key.clone(), "\"abc\"");

        let mut headers = HeaderMap::new();
        middleware.apply(&key, &mut headers);

        assert_eq!(headers.get(IF_NONE_MATCH).unwrap(), "\"abc\"");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "token secret");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_omits_if_none_match_without_etag() {
        let middleware = middleware();
        let mut headers = HeaderMap::new();

        middleware.apply(&CacheKey::from("GET/api/v2/projects"), &mut headers);

        assert!(headers.get(IF_NONE_MATCH).is_none());
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "token secret");
    }

    #[test]
    fn test_omits_unsendable_etag() {
        let middleware = middleware();
        let key = CacheKey::from("GET/x");
        middleware.etags.insert(key.clone(), "bad\netag");

        let mut headers = HeaderMap::new();
        middleware.apply(&key, &mut headers);

        assert!(headers.get(IF_NONE_MATCH).is_none());
    }

    #[test]
    fn test_rejects_unsendable_auth_key() {
        let etags = EtagStore::new("etags", Duration::from_secs(60), None);
        assert!(ConditionalRequestMiddleware::new(etags, "bad\nkey").is_err());
    }

    #[test]
    fn test_request_key_ignores_host() {
        let a = Url::parse("https://api.phrase.com/api/v2/projects?page=2").unwrap();
        let b = Url::parse("http://127.0.0.1:8080/api/v2/projects?page=2").unwrap();
        assert_eq!(request_key(&Method::GET, &a), request_key(&Method::GET, &b));
        assert_ne!(request_key(&Method::GET, &a), request_key(&Method::POST, &a));
    }
}
