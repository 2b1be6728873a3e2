#![warn(missing_docs)]
//! # phrase-sync
//!
//! Keeps `.properties` bundles on disk in step with a Phrase project.
//!
//! A [`SyncTask`] lists the locales of every configured branch and writes
//! each one to `<root>/<messages folder>[_<branch>]/<prefix><code><postfix>`.
//! It can run once with [`SyncTask::run`] or on a schedule with
//! [`SyncTask::spawn`].
//!
//! ```no_run
//! use phrase_sync::{SyncConfig, SyncTask};
//!
//! # async fn run() -> phrase_sync::Result<()> {
//! let config = SyncConfig::from_yaml_str(&std::fs::read_to_string("phrase.yaml").unwrap())?;
//! let interval = config.interval;
//! let schedule = SyncTask::new(config).await?.spawn(interval)?;
//! // ...
//! schedule.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod schedule;
mod task;

pub use config::{DEFAULT_BRANCH, DEFAULT_INTERVAL, SyncConfig};
pub use error::{Result, SyncError};
pub use schedule::SyncHandle;
pub use task::{SyncReport, SyncTask};
