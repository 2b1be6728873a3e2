//! Periodic execution of a [`SyncTask`].

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, debug, info_span};

use crate::error::{Result, SyncError};
use crate::task::{SyncReport, SyncTask};

impl SyncTask {
    /// Runs the task now and then every `interval` on the current tokio
    /// runtime.
    ///
    /// A run that takes longer than `interval` delays the next one instead
    /// of overlapping with it.
    pub fn spawn(self, interval: Duration) -> Result<SyncHandle> {
        if interval.is_zero() {
            return Err(SyncError::ZeroInterval);
        }
        let runtime = Handle::try_current().map_err(|_| SyncError::NoRuntime)?;

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let (report_tx, report_rx) = watch::channel(None);
        let span = info_span!("phrase_sync_schedule", project_id = %self.config().project_id);

        let handle = runtime.spawn(
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        _ = &mut stop_rx => break,
                        _ = ticker.tick() => {
                            let report = self.run().await;
                            report_tx.send_replace(Some(report));
                        }
                    }
                }
                debug!("Scheduled sync stopped");
                self.shutdown().await;
            }
            .instrument(span),
        );

        Ok(SyncHandle {
            stop: Some(stop_tx),
            handle: Some(handle),
            reports: report_rx,
        })
    }
}

/// Handle to a scheduled [`SyncTask`].
///
/// Dropping the handle aborts the schedule; [`shutdown`](SyncHandle::shutdown)
/// lets a running pass finish first.
#[derive(Debug)]
pub struct SyncHandle {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    reports: watch::Receiver<Option<SyncReport>>,
}

impl SyncHandle {
    /// Receiver of the report of the latest completed run.
    pub fn subscribe(&self) -> watch::Receiver<Option<SyncReport>> {
        self.reports.clone()
    }

    /// Report of the latest completed run, `None` before the first one.
    pub fn last_report(&self) -> Option<SyncReport> {
        *self.reports.borrow()
    }

    /// Whether the schedule has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops the schedule after the current run and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take()
            && let Err(error) = handle.await
        {
            debug!(%error, "Scheduled sync ended abnormally");
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
