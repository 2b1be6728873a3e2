//! Error types of the sync task.

use std::path::PathBuf;

use phrase_client::PhraseError;
use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T, E = SyncError> = std::result::Result<T, E>;

/// Errors that stop a sync task from being created or scheduled.
///
/// Failures of single branches or locales during a run are logged and
/// counted in the [`SyncReport`](crate::SyncReport) instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The YAML configuration could not be parsed.
    #[error("Invalid sync configuration: {0}")]
    Config(#[from] serde_saphyr::Error),

    /// The API client could not be created, or an API call failed.
    #[error(transparent)]
    Client(#[from] PhraseError),

    /// A directory or bundle could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A schedule needs a positive interval.
    #[error("Sync interval must be greater than zero")]
    ZeroInterval,

    /// Scheduling needs a tokio runtime.
    #[error("Sync task can only be scheduled inside a tokio runtime")]
    NoRuntime,
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
