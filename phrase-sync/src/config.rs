//! Sync task configuration.

use std::path::PathBuf;
use std::time::Duration;

use phrase_cache::CacheConfig;
use phrase_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Branch whose bundles go to the plain messages folder.
pub const DEFAULT_BRANCH: &str = "master";

/// Default period between two runs of a scheduled sync.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

fn default_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_branches() -> Vec<String> {
    vec![DEFAULT_BRANCH.to_owned()]
}

fn default_generated_resources_folder() -> PathBuf {
    PathBuf::from("generated-resources/")
}

fn default_messages_folder() -> String {
    "messages".to_owned()
}

fn default_messages_file_prefix() -> String {
    "messages_".to_owned()
}

fn default_messages_file_postfix() -> String {
    ".properties".to_owned()
}

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

/// What to download and where to write it.
///
/// Bundles of the locale `de-DE` land in
/// `<generated_resources_folder>/<messages_folder>/messages_de_DE.properties`
/// for the default branch and in `<messages_folder>_<branch>` for any other.
///
/// ```
/// use phrase_sync::SyncConfig;
///
/// let config = SyncConfig::from_yaml_str(r#"
/// auth_key: secret
/// project_id: p1
/// branches: [master, feature]
/// interval: 10m
/// cache:
///   response_ttl: 1h
/// "#).unwrap();
///
/// assert_eq!(config.branches, ["master", "feature"]);
/// assert_eq!(config.interval.as_secs(), 600);
/// assert_eq!(config.messages_file_prefix, "messages_");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Scheme and host of the Phrase API.
    #[serde(default = "default_url")]
    pub url: String,
    /// API access token, sent as `Authorization: token <auth_key>`.
    pub auth_key: String,
    /// Project whose locales are downloaded.
    pub project_id: String,
    /// Branches to download, each into its own folder.
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,
    /// Comma separated tags restricting the downloaded keys.
    #[serde(default)]
    pub tags: Option<String>,
    /// Root directory of all bundles, created when the task is.
    #[serde(default = "default_generated_resources_folder")]
    pub generated_resources_folder: PathBuf,
    /// Folder of the default branch bundles, suffixed with `_<branch>` for other branches.
    #[serde(default = "default_messages_folder")]
    pub messages_folder: String,
    /// Prefix of every bundle file name.
    #[serde(default = "default_messages_file_prefix")]
    pub messages_file_prefix: String,
    /// Suffix of every bundle file name, including the extension.
    #[serde(default = "default_messages_file_postfix")]
    pub messages_file_postfix: String,
    /// Escape `'` as `''` in downloaded bundles.
    #[serde(default)]
    pub escape_single_quotes: bool,
    /// Period of a scheduled sync.
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
    /// Caches of the underlying API client.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl SyncConfig {
    /// Config with defaults for everything but the credentials.
    pub fn new(auth_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            url: default_url(),
            auth_key: auth_key.into(),
            project_id: project_id.into(),
            branches: default_branches(),
            tags: None,
            generated_resources_folder: default_generated_resources_folder(),
            messages_folder: default_messages_folder(),
            messages_file_prefix: default_messages_file_prefix(),
            messages_file_postfix: default_messages_file_postfix(),
            escape_single_quotes: false,
            interval: DEFAULT_INTERVAL,
            cache: CacheConfig::default(),
        }
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// Settings of the API client used by the task.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.auth_key.as_str())
            .with_base_url(self.url.as_str())
            .with_cache(self.cache.clone())
    }

    /// Directory holding the bundles of `branch`.
    pub fn branch_directory(&self, branch: &str) -> PathBuf {
        let folder = if branch == DEFAULT_BRANCH {
            self.messages_folder.clone()
        } else {
            format!("{}_{branch}", self.messages_folder)
        };
        self.generated_resources_folder.join(folder)
    }

    /// File name of the bundle of the locale `code`.
    pub fn file_name(&self, code: &str) -> String {
        format!(
            "{}{}{}",
            self.messages_file_prefix,
            code.replace('-', "_"),
            self.messages_file_postfix
        )
    }
}
