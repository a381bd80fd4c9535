//! # Poller
//!
//! A [`Poller`] keeps a background-refreshed copy of a resource. It wraps a
//! [`ResourceFetcher`], calls it once per update period from a single refresh loop, and publishes
//! each successful result as the new snapshot. Readers never wait on a fetch: they get whatever
//! value was stored last, or `T::default()` if nothing has been fetched yet.
//!
//! ## Lifecycle
//!
//! ```text
//! NotStarted --start_polling--> Running --ctx cancelled--> Stopped
//! ```
//!
//! Only the first call to [`Poller::start_polling`] runs the loop. Later calls never fetch; they
//! wait for the running loop to stop, or return right away if it already has.
//! A failed fetch is logged and retried on the next period. Cancellation is observed between
//! fetches, so a fetch already in flight finishes (and may still publish) before the loop exits.
//!
//! ## Readiness
//!
//! Configure [`with_first_poll_done`][options::with_first_poll_done] to be told when the first
//! fetch succeeds. The signal fires exactly once: after the first success, or when the loop stops
//! without ever succeeding, in which case readers still see the default value.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use freshet::poller::{
//!     options::{with_first_poll_done, with_update_period},
//!     Poller,
//! };
//! use tokio::sync::watch;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (ready_tx, mut ready_rx) = watch::channel(false);
//!
//! let poller = Poller::new(
//!     |_ctx: CancellationToken| async { Ok::<_, std::io::Error>(String::from("v1")) },
//!     [
//!         with_update_period(Duration::from_millis(50)),
//!         with_first_poll_done(ready_tx),
//!     ],
//! )?
//! .into_shared();
//!
//! let ctx = CancellationToken::new();
//! let polling = poller.spawn_polling(ctx.clone());
//!
//! ready_rx.wait_for(|done| *done).await?;
//! assert_eq!("v1", poller.get_resource());
//!
//! ctx.cancel();
//! assert!(polling.await?);
//! # Ok(())
//! # }
//! ```

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use arc_swap::ArcSwap;
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub use freshet_traits::fetch::ResourceFetcher;
use freshet_traits::snapshot::SnapshotSource;

use crate::error::{ConfigError, FetchError};

pub mod options;

use options::PollerOption;

/// Used when no update period option is given.
pub const DEFAULT_UPDATE_PERIOD: Duration = Duration::from_secs(1);

/// Periodically refreshes a resource in the background and serves the latest successful value
/// to any number of concurrent readers.
pub struct Poller<T> {
    fetcher: Box<dyn ResourceFetcher<T>>,
    update_period: Duration,
    started: AtomicBool,
    resource: ArcSwap<T>,
    first_poll_done: Option<watch::Sender<bool>>,
    stopped: watch::Sender<bool>,
}

impl<T: Default + Send + Sync + 'static> Poller<T> {
    /// Create a poller around `fetcher`, applying `options` in order. If two options set the same
    /// field, the later one wins. The first option that fails aborts construction.
    pub fn new<F, I>(fetcher: F, options: I) -> Result<Self, ConfigError>
    where
        F: ResourceFetcher<T> + 'static,
        I: IntoIterator<Item = PollerOption<T>>,
    {
        let mut poller = Self {
            fetcher: Box::new(fetcher),
            update_period: DEFAULT_UPDATE_PERIOD,
            started: AtomicBool::new(false),
            resource: ArcSwap::from_pointee(T::default()),
            first_poll_done: None,
            stopped: watch::channel(false).0,
        };

        for option in options {
            option.apply(&mut poller)?;
        }

        Ok(poller)
    }

    /// Convenience for sharing one poller between the task that drives it and its readers.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns a copy of the current snapshot. Never blocks and never fails; before the first
    /// successful fetch this is `T::default()`.
    pub fn get_resource(&self) -> T
    where
        T: Clone,
    {
        T::clone(&self.resource.load())
    }

    /// Returns the current snapshot without copying it.
    pub fn snapshot(&self) -> Arc<T> {
        self.resource.load_full()
    }

    /// Fetch once and, on success, publish the result as the new snapshot.
    ///
    /// This can be called at any time, including while the refresh loop is running. Both are
    /// plain writers to the same slot: whichever store happens last is the one readers see.
    pub async fn poll(&self, ctx: CancellationToken) -> Result<(), FetchError> {
        let resource = self.fetcher.fetch(ctx).await.map_err(FetchError::new)?;
        self.resource.store(Arc::new(resource));
        Ok(())
    }

    /// Run the refresh loop until `ctx` is cancelled.
    ///
    /// Only the first call on a poller runs the loop, and it returns `true` once the loop has
    /// stopped. Every other call fetches nothing: it waits until the running loop has stopped and
    /// then returns `false`, or returns `false` at once if the loop already stopped.
    pub async fn start_polling(&self, ctx: CancellationToken) -> bool {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Polling already started, waiting for it to stop");
            let mut stopped = self.stopped.subscribe();
            // The sender lives in `self`, so this only returns once the loop has stopped.
            let _ = stopped.wait_for(|done| *done).await;
            return false;
        }

        let mut stopped = Latch::new(Some(&self.stopped));
        let mut readiness = Latch::new(self.first_poll_done.as_ref());
        info!(update_period = ?self.update_period, "Start polling");

        loop {
            match self.poll(ctx.clone()).await {
                Ok(()) => {
                    readiness.release();
                    debug!("Resource updated");
                }
                Err(err) => error!(error = %err, "Cannot update resource"),
            }

            tokio::select! {
                biased;
                _ = ctx.cancelled() => break,
                _ = tokio::time::sleep(self.update_period) => {}
            }
        }

        readiness.release();
        info!("Stop polling");
        stopped.release();
        true
    }

    /// Spawn [`Poller::start_polling`] onto the current tokio runtime. Await the handle after
    /// cancelling `ctx` to make sure the loop has exited.
    pub fn spawn_polling(self: &Arc<Self>, ctx: CancellationToken) -> JoinHandle<bool> {
        let poller = Arc::clone(self);
        tokio::spawn(async move { poller.start_polling(ctx).await })
    }
}

impl<T> Poller<T> {
    /// Whether some caller has already taken the start guard.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Delay between the end of one fetch and the start of the next.
    pub fn update_period(&self) -> Duration {
        self.update_period
    }
}

impl<T> SnapshotSource<T> for Poller<T> {
    fn latest_snapshot(&self) -> Arc<T> {
        self.resource.load_full()
    }
}

impl<T> fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("update_period", &self.update_period)
            .field("started", &self.is_started())
            .field("first_poll_done", &self.first_poll_done.is_some())
            .finish_non_exhaustive()
    }
}

/// Sets a watch signal to `true` at most once. Dropping it fires the signal too, so waiters are
/// released even if the loop future is dropped before it stops on its own.
struct Latch<'a> {
    signal: Option<&'a watch::Sender<bool>>,
}

impl<'a> Latch<'a> {
    fn new(signal: Option<&'a watch::Sender<bool>>) -> Self {
        Self { signal }
    }

    fn release(&mut self) {
        if let Some(signal) = self.signal.take() {
            signal.send_replace(true);
        }
    }
}

impl Drop for Latch<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
