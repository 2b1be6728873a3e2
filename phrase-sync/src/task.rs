//! One pass over all configured branches and their locales.

use std::path::PathBuf;

use phrase_client::PhraseApiClient;
use phrase_client::model::PhraseLocale;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::{DEFAULT_BRANCH, SyncConfig};
use crate::error::{Result, SyncError};

/// Outcome of a [`SyncTask::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Bundles written to disk.
    pub files_written: usize,
    /// Locales whose bundle could not be downloaded or written.
    pub locales_failed: usize,
    /// Branches whose locales could not be listed.
    pub branches_failed: usize,
}

impl SyncReport {
    /// Whether nothing failed.
    pub fn is_clean(&self) -> bool {
        self.locales_failed == 0 && self.branches_failed == 0
    }
}

/// Downloads every locale of every configured branch as a `.properties`
/// bundle.
///
/// The task owns its API client, so repeated runs revalidate unchanged
/// bundles with the server instead of downloading them again.
#[derive(Debug)]
pub struct SyncTask {
    config: SyncConfig,
    client: PhraseApiClient,
}

impl SyncTask {
    /// Creates the task and its output root.
    pub async fn new(config: SyncConfig) -> Result<Self> {
        let client = PhraseApiClient::new(config.client_config())?;
        Self::with_client(config, client).await
    }

    /// Creates the task around an existing client.
    pub async fn with_client(config: SyncConfig, client: PhraseApiClient) -> Result<Self> {
        let root = &config.generated_resources_folder;
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|error| SyncError::io(root, error))?;
        debug!(root = %root.display(), "Created bundle root");
        Ok(Self { config, client })
    }

    /// The task configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The API client used for downloads.
    pub fn client(&self) -> &PhraseApiClient {
        &self.client
    }

    /// Syncs all branches once.
    ///
    /// Never fails: a branch whose locales cannot be listed and a locale
    /// whose bundle cannot be fetched or written are logged and skipped.
    pub async fn run(&self) -> SyncReport {
        let span = info_span!("phrase_sync", project_id = %self.config.project_id);
        async {
            debug!("Phrase sync started");
            let mut report = SyncReport::default();
            for branch in &self.config.branches {
                self.sync_branch(branch, &mut report).await;
            }
            info!(
                files_written = report.files_written,
                locales_failed = report.locales_failed,
                branches_failed = report.branches_failed,
                "Phrase sync finished"
            );
            report
        }
        .instrument(span)
        .await
    }

    /// Stops the background work of the API client.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    async fn sync_branch(&self, branch: &str, report: &mut SyncReport) {
        let locales = match self
            .client
            .locales(&self.config.project_id, api_branch(branch))
            .await
        {
            Ok(locales) => locales,
            Err(error) => {
                warn!(branch, %error, "Failed to list locales, skipping branch");
                report.branches_failed += 1;
                return;
            }
        };

        for locale in &locales {
            match self.sync_locale(branch, locale).await {
                Ok(path) => {
                    debug!(branch, locale = %locale.code, path = %path.display(), "Bundle written");
                    report.files_written += 1;
                }
                Err(error) => {
                    warn!(branch, locale = %locale.code, %error, "Failed to sync locale");
                    report.locales_failed += 1;
                }
            }
        }
    }

    async fn sync_locale(&self, branch: &str, locale: &PhraseLocale) -> Result<PathBuf> {
        let bundle = self
            .client
            .download_locale_as_properties(
                &self.config.project_id,
                &locale.id,
                self.config.escape_single_quotes,
                api_branch(branch),
                self.config.tags.as_deref(),
            )
            .await?;

        let directory = self.config.branch_directory(branch);
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|error| SyncError::io(&directory, error))?;
        let path = directory.join(self.config.file_name(&locale.code));
        tokio::fs::write(&path, &bundle)
            .await
            .map_err(|error| SyncError::io(&path, error))?;
        Ok(path)
    }
}

/// The default branch is addressed without a `branch` parameter.
fn api_branch(branch: &str) -> Option<&str> {
    (branch != DEFAULT_BRANCH).then_some(branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branch_is_not_sent() {
        assert_eq!(api_branch("master"), None);
        assert_eq!(api_branch("feature"), Some("feature"));
    }

    #[test]
    fn test_report_is_clean() {
        assert!(SyncReport::default().is_clean());
        let report = SyncReport {
            files_written: 3,
            locales_failed: 1,
            branches_failed: 0,
        };
        assert!(!report.is_clean());
    }
}
