//! Periodic purge of expired cache entries.
//!
//! The sweeper is a tokio task that wakes every `interval` and asks each
//! registered [`Sweep`] target to drop its expired entries. It only ever
//! removes entries, so it can run concurrently with any read or write.
//!
//! A panic inside one target is caught and logged; the remaining targets are
//! still swept and the task keeps its schedule.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, debug, info_span, warn};

/// A store whose expired entries can be purged on demand.
pub trait Sweep: Send + Sync + 'static {
    /// Name of the store in logs.
    fn label(&self) -> &'static str;

    /// Purges expired entries.
    fn sweep(&self);

    /// Approximate number of entries after the last purge.
    fn entry_count(&self) -> u64;
}

/// Handle to a running sweep task.
///
/// Dropping the handle aborts the task; [`shutdown`](Sweeper::shutdown)
/// stops it and waits until it has exited.
#[derive(Debug)]
pub struct Sweeper {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawns a sweep task on the current tokio runtime.
    ///
    /// Returns `None` when called outside a runtime or with a zero interval.
    /// Expired entries are still never returned in that case; they are only
    /// purged later.
    pub fn spawn(targets: Vec<Box<dyn Sweep>>, interval: Duration) -> Option<Self> {
        if interval.is_zero() {
            debug!("Cache sweep disabled by zero interval");
            return None;
        }
        match Handle::try_current() {
            Ok(runtime) => Some(Self::spawn_on(&runtime, targets, interval)),
            Err(_) => {
                warn!("No tokio runtime available, expired cache entries will be purged lazily");
                None
            }
        }
    }

    /// Spawns a sweep task on the given runtime.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn spawn_on(runtime: &Handle, targets: Vec<Box<dyn Sweep>>, interval: Duration) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let span = info_span!("cache_sweep", interval_ms = interval.as_millis() as u64);

        let handle = runtime.spawn(
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // The first tick completes immediately.
                ticker.tick().await;
                loop {
                    tokio::select! {
                        _ = &mut stopped => break,
                        _ = ticker.tick() => sweep_all(&targets),
                    }
                }
                debug!("Cache sweep stopped");
            }
            .instrument(span),
        );

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Returns `true` once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take()
            && let Err(err) = handle.await
            && err.is_panic()
        {
            warn!("Cache sweep task panicked before shutdown");
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn sweep_all(targets: &[Box<dyn Sweep>]) {
    for target in targets {
        match catch_unwind(AssertUnwindSafe(|| target.sweep())) {
            Ok(()) => debug!(
                store = target.label(),
                entries = target.entry_count(),
                "Cache sweep finished"
            ),
            Err(panic) => warn!(
                store = target.label(),
                reason = panic_message(panic.as_ref()),
                "Cache sweep failed"
            ),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Clone, Default)]
    struct Counting(Arc<AtomicUsize>);

    impl Sweep for Counting {
        fn label(&self) -> &'static str {
            "counting"
        }

        fn sweep(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn entry_count(&self) -> u64 {
            0
        }
    }

    struct Failing;

    impl Sweep for Failing {
        fn label(&self) -> &'static str {
            "failing"
        }

        fn sweep(&self) {
            panic!("store is poisoned");
        }

        fn entry_count(&self) -> u64 {
            0
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_on_every_tick() {
        let counter = Counting::default();
        let targets: Vec<Box<dyn Sweep>> = vec![Box::new(counter.clone())];
        let sweeper =
            Sweeper::spawn(targets, Duration::from_secs(10)).expect("runtime is available");

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 3);

        sweeper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_target_does_not_stop_sweep() {
        let counter = Counting::default();
        let targets: Vec<Box<dyn Sweep>> = vec![Box::new(Failing), Box::new(counter.clone())];
        let sweeper =
            Sweeper::spawn(targets, Duration::from_secs(1)).expect("runtime is available");

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
        assert!(!sweeper.is_finished());

        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_task() {
        let targets: Vec<Box<dyn Sweep>> = vec![Box::new(Counting::default())];
        let sweeper =
            Sweeper::spawn(targets, Duration::from_secs(1)).expect("runtime is available");
        assert!(!sweeper.is_finished());
        sweeper.shutdown().await;
    }

    #[tokio::test]
    async fn test_zero_interval_disables_sweep() {
        assert!(Sweeper::spawn(Vec::new(), Duration::ZERO).is_none());
    }

    #[test]
    fn test_no_runtime_no_sweep() {
        let targets: Vec<Box<dyn Sweep>> = vec![Box::new(Counting::default())];
        assert!(Sweeper::spawn(targets, Duration::from_secs(1)).is_none());
    }
}
