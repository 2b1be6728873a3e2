//! Typed endpoints of the Phrase API.

use std::fmt;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, StatusCode};
use phrase_cache::{Caches, Sweeper};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info};
use url::Url;

use crate::config::ClientConfig;
use crate::content::DecodedPayload;
use crate::error::{PhraseError, Result};
use crate::middleware::{ConditionalRequestMiddleware, request_key};
use crate::model::{
    CreateKey, CreatePhraseLocale, CreatePhraseProject, CreateTranslation, DownloadLocaleOptions,
    Key, PhraseLocale, PhraseLocaleMessages, PhraseProject, PhraseTagWithStats, Translation,
    UpdatePhraseProject,
};
use crate::processor::{RawResponse, ResponseProcessor};

const API_PREFIX: [&str; 2] = ["api", "v2"];

/// Branch name used in logs when a call targets the main branch.
const DEFAULT_BRANCH: &str = "master";

fn branch_for_log(branch: Option<&str>) -> &str {
    match branch {
        Some(branch) if !branch.trim().is_empty() => branch,
        _ => DEFAULT_BRANCH,
    }
}

/// Marker type: no [`ClientConfig`] given to the builder yet.
///
/// [`PhraseApiClientBuilder::build`] only exists once
/// [`config`](PhraseApiClientBuilder::config) was called.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConfig;

/// Builder for [`PhraseApiClient`].
///
/// ```no_run
/// use phrase_client::{ClientConfig, PhraseApiClient};
///
/// # async fn run() -> phrase_client::Result<()> {
/// let client = PhraseApiClient::builder()
///     .config(ClientConfig::new("my-token"))
///     .http_client(reqwest::Client::new())
///     .build()?;
///
/// let projects = client.projects().await?;
/// client.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PhraseApiClientBuilder<C> {
    config: C,
    http_client: Option<reqwest::Client>,
}

impl<C> PhraseApiClientBuilder<C> {
    /// Sets the client configuration.
    pub fn config(self, config: ClientConfig) -> PhraseApiClientBuilder<ClientConfig> {
        PhraseApiClientBuilder {
            config,
            http_client: self.http_client,
        }
    }

    /// Uses `client` as transport instead of a default [`reqwest::Client`].
    ///
    /// Timeouts, proxies and TLS settings all come from the transport.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl PhraseApiClientBuilder<ClientConfig> {
    /// Creates the client, its caches and, inside a tokio runtime, the
    /// background sweep of expired entries.
    pub fn build(self) -> Result<PhraseApiClient> {
        let Self {
            config,
            http_client,
        } = self;
        let base_url = parse_base_url(&config.base_url)?;

        let caches = Caches::new(&config.cache);
        let middleware =
            ConditionalRequestMiddleware::new(caches.etags().clone(), &config.auth_key)?;
        let http = reqwest_middleware::ClientBuilder::new(http_client.unwrap_or_default())
            .with(middleware)
            .build();
        let sweeper = caches.spawn_sweeper(&config.cache);

        info!(
            base_url = %base_url,
            response_ttl = ?config.cache.response_ttl,
            etag_ttl = ?config.cache.etag_ttl,
            sweeping = sweeper.is_some(),
            "Phrase API client created"
        );

        Ok(PhraseApiClient {
            http,
            base_url,
            processor: ResponseProcessor::new(caches),
            sweeper,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|error| PhraseError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: error.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(PhraseError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: "not a hierarchical url".to_owned(),
        });
    }
    Ok(url)
}

#[derive(Serialize)]
struct SearchKeys<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    locale_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

/// Client of the Phrase API v2.
///
/// Every read goes through the conditional-request pipeline: the first
/// response of a request is cached with its ETag, later calls send
/// `If-None-Match` and a `304 Not Modified` answer is served from the cache.
/// The caches belong to this instance and live as long as it does.
pub struct PhraseApiClient {
    http: ClientWithMiddleware,
    base_url: Url,
    processor: ResponseProcessor,
    sweeper: Option<Sweeper>,
}

impl PhraseApiClient {
    /// Starts building a client.
    pub fn builder() -> PhraseApiClientBuilder<NoConfig> {
        PhraseApiClientBuilder {
            config: NoConfig,
            http_client: None,
        }
    }

    /// Creates a client with a default transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Scheme and host requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// ETag store and response cache of this client.
    pub fn caches(&self) -> &Caches {
        self.processor.caches()
    }

    /// Stops the background sweep and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.shutdown().await;
        }
        debug!("Phrase API client shut down");
    }

    // Projects

    /// Lists all projects of the account.
    pub async fn projects(&self) -> Result<Vec<PhraseProject>> {
        debug!("Get projects");
        let url = self.endpoint(&["projects"])?;
        self.get_object(url).await
    }

    /// Fetches a single project.
    pub async fn project(&self, project_id: &str) -> Result<PhraseProject> {
        debug!(project_id, "Get project");
        let url = self.endpoint(&["projects", project_id])?;
        self.get_object(url).await
    }

    /// Creates a project.
    pub async fn create_project(&self, project: &CreatePhraseProject) -> Result<PhraseProject> {
        debug!(name = %project.name, "Create project");
        let url = self.endpoint(&["projects"])?;
        self.send_object(Method::POST, url, project).await
    }

    /// Updates a project.
    pub async fn update_project(
        &self,
        project_id: &str,
        project: &UpdatePhraseProject,
    ) -> Result<PhraseProject> {
        debug!(project_id, name = %project.name, "Update project");
        let url = self.endpoint(&["projects", project_id])?;
        self.send_object(Method::PATCH, url, project).await
    }

    /// Deletes a project. Returns `true` if the server answered
    /// `204 No Content`.
    pub async fn delete_project(&self, project_id: &str) -> Result<bool> {
        debug!(project_id, "Delete project");
        let url = self.endpoint(&["projects", project_id])?;
        self.delete(url).await
    }

    // Locales

    /// Lists the locales of a branch, the main branch when `branch` is `None`.
    pub async fn locales(
        &self,
        project_id: &str,
        branch: Option<&str>,
    ) -> Result<Vec<PhraseLocale>> {
        debug!(project_id, branch = branch_for_log(branch), "Get locales");
        let mut url = self.endpoint(&["projects", project_id, "locales"])?;
        append_query(&mut url, &[("branch", branch)]);
        self.get_object(url).await
    }

    /// Fetches a single locale.
    pub async fn locale(
        &self,
        project_id: &str,
        locale_id: &str,
        branch: Option<&str>,
    ) -> Result<PhraseLocale> {
        debug!(project_id, locale_id, branch = branch_for_log(branch), "Get locale");
        let mut url = self.endpoint(&["projects", project_id, "locales", locale_id])?;
        append_query(&mut url, &[("branch", branch)]);
        self.get_object(url).await
    }

    /// Creates a locale.
    pub async fn create_locale(
        &self,
        project_id: &str,
        locale: &CreatePhraseLocale,
    ) -> Result<PhraseLocale> {
        debug!(
            project_id,
            code = %locale.code,
            branch = branch_for_log(locale.branch.as_deref()),
            "Create locale"
        );
        let url = self.endpoint(&["projects", project_id, "locales"])?;
        self.send_object(Method::POST, url, locale).await
    }

    /// Updates a locale.
    pub async fn update_locale(
        &self,
        project_id: &str,
        locale_id: &str,
        locale: &CreatePhraseLocale,
    ) -> Result<PhraseLocale> {
        debug!(
            project_id,
            locale_id,
            branch = branch_for_log(locale.branch.as_deref()),
            "Update locale"
        );
        let url = self.endpoint(&["projects", project_id, "locales", locale_id])?;
        self.send_object(Method::PATCH, url, locale).await
    }

    /// Deletes a locale. Returns `true` if the server answered
    /// `204 No Content`.
    pub async fn delete_locale(
        &self,
        project_id: &str,
        locale_id: &str,
        branch: Option<&str>,
    ) -> Result<bool> {
        debug!(project_id, locale_id, branch = branch_for_log(branch), "Delete locale");
        let mut url = self.endpoint(&["projects", project_id, "locales", locale_id])?;
        append_query(&mut url, &[("branch", branch)]);
        self.delete(url).await
    }

    /// Downloads the messages of a locale as JSON.
    pub async fn download_locale(
        &self,
        project_id: &str,
        locale_id: &str,
        options: Option<&DownloadLocaleOptions>,
    ) -> Result<PhraseLocaleMessages> {
        let defaults = DownloadLocaleOptions::default();
        let options = options.unwrap_or(&defaults);
        debug!(
            project_id,
            locale_id,
            branch = branch_for_log(options.branch.as_deref()),
            tags = ?options.tags,
            "Download locale"
        );
        let mut url = self.endpoint(&["projects", project_id, "locales", locale_id, "download"])?;
        append_query(
            &mut url,
            &[
                ("file_format", Some("json")),
                ("branch", options.branch.as_deref()),
                ("tags", options.tags.as_deref()),
                ("fallback_locale_id", options.fallback_locale_id.as_deref()),
                (
                    "include_empty_translations",
                    flag(options.include_empty_translations),
                ),
                (
                    "format_options[escape_single_quotes]",
                    flag(options.escape_single_quotes),
                ),
            ],
        );
        self.get_object(url).await
    }

    /// Downloads a locale as a Java `.properties` bundle.
    pub async fn download_locale_as_properties(
        &self,
        project_id: &str,
        locale_id: &str,
        escape_single_quotes: bool,
        branch: Option<&str>,
        tags: Option<&str>,
    ) -> Result<Bytes> {
        debug!(
            project_id,
            locale_id,
            branch = branch_for_log(branch),
            tags,
            "Download locale as properties"
        );
        let mut url = self.endpoint(&["projects", project_id, "locales", locale_id, "download"])?;
        append_query(
            &mut url,
            &[
                ("file_format", Some("properties")),
                ("branch", branch),
                ("tags", tags),
                ("format_options[escape_single_quotes]", flag(escape_single_quotes)),
            ],
        );
        self.fetch::<IgnoredAny>(Method::GET, url, None)
            .await?
            .into_bytes()
    }

    // Translations

    /// Lists the translations of a locale.
    pub async fn translations(
        &self,
        project_id: &str,
        locale_id: &str,
        branch: Option<&str>,
    ) -> Result<Vec<Translation>> {
        debug!(project_id, locale_id, branch = branch_for_log(branch), "Get translations");
        let mut url =
            self.endpoint(&["projects", project_id, "locales", locale_id, "translations"])?;
        append_query(&mut url, &[("branch", branch)]);
        self.get_object(url).await
    }

    /// Lists the translations of a key in every locale.
    pub async fn translations_by_key(
        &self,
        project_id: &str,
        key_id: &str,
        branch: Option<&str>,
    ) -> Result<Vec<Translation>> {
        debug!(project_id, key_id, branch = branch_for_log(branch), "Get translations of key");
        let mut url = self.endpoint(&["projects", project_id, "keys", key_id, "translations"])?;
        append_query(&mut url, &[("branch", branch)]);
        self.get_object(url).await
    }

    /// Creates a translation.
    pub async fn create_translation(
        &self,
        project_id: &str,
        translation: &CreateTranslation,
    ) -> Result<Translation> {
        debug!(
            project_id,
            locale_id = %translation.locale_id,
            key_id = %translation.key_id,
            branch = branch_for_log(translation.branch.as_deref()),
            "Create translation"
        );
        let url = self.endpoint(&["projects", project_id, "translations"])?;
        self.send_object(Method::POST, url, translation).await
    }

    // Keys

    /// Creates a key.
    pub async fn create_key(&self, project_id: &str, key: &CreateKey) -> Result<Key> {
        debug!(
            project_id,
            name = %key.name,
            branch = branch_for_log(key.branch.as_deref()),
            "Create key"
        );
        let url = self.endpoint(&["projects", project_id, "keys"])?;
        self.send_object(Method::POST, url, key).await
    }

    /// Searches keys by query, optionally restricted to one locale.
    pub async fn search_keys(
        &self,
        project_id: &str,
        locale_id: Option<&str>,
        q: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Vec<Key>> {
        debug!(project_id, locale_id, q, branch = branch_for_log(branch), "Search keys");
        let url = self.endpoint(&["projects", project_id, "keys", "search"])?;
        let body = SearchKeys {
            locale_id,
            q,
            branch,
        };
        self.send_object(Method::POST, url, &body).await
    }

    /// Deletes a key. Returns `true` if the server answered `204 No Content`.
    pub async fn delete_key(
        &self,
        project_id: &str,
        key_id: &str,
        branch: Option<&str>,
    ) -> Result<bool> {
        debug!(project_id, key_id, branch = branch_for_log(branch), "Delete key");
        let mut url = self.endpoint(&["projects", project_id, "keys", key_id])?;
        append_query(&mut url, &[("branch", branch)]);
        self.delete(url).await
    }

    // Tags

    /// Fetches a tag with its per-locale statistics.
    pub async fn tag(
        &self,
        project_id: &str,
        tag_name: &str,
        branch: Option<&str>,
    ) -> Result<PhraseTagWithStats> {
        debug!(project_id, tag_name, branch = branch_for_log(branch), "Get tag");
        let mut url = self.endpoint(&["projects", project_id, "tags", tag_name])?;
        append_query(&mut url, &[("branch", branch)]);
        self.get_object(url).await
    }

    /// URL of `/api/v2/<segments>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PhraseError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "not a hierarchical url".to_owned(),
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<RawResponse> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }
        let response = request.send().await?;
        RawResponse::read(response).await
    }

    async fn fetch<T>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<DecodedPayload<T>>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let key = request_key(&method, &url);
        let response = self.send(method, url, body).await?;
        self.processor.process(&key, response)
    }

    async fn get_object<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.fetch(Method::GET, url, None).await?.into_object()
    }

    async fn send_object<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let body = serde_json::to_vec(body).map_err(PhraseError::Encode)?;
        self.fetch(method, url, Some(body)).await?.into_object()
    }

    async fn delete(&self, url: Url) -> Result<bool> {
        let key = request_key(&Method::DELETE, &url);
        let response = self.send(Method::DELETE, url, None).await?;
        self.processor.check_status(&key, &response)?;
        Ok(response.status == StatusCode::NO_CONTENT)
    }
}

impl fmt::Debug for PhraseApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("caches", self.processor.caches())
            .field("sweeping", &self.sweeper.is_some())
            .finish()
    }
}

/// Appends the pairs whose value is set. Leaves the URL without a query when
/// none is.
fn append_query(url: &mut Url, pairs: &[(&str, Option<&str>)]) {
    let mut present = pairs
        .iter()
        .filter_map(|(name, value)| value.map(|value| (*name, value)))
        .peekable();
    if present.peek().is_none() {
        return;
    }
    url.query_pairs_mut().extend_pairs(present);
}

fn flag(enabled: bool) -> Option<&'static str> {
    enabled.then_some("true")
}
