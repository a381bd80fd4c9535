//! # Snapshots
//!
//! A [`Poller`][crate::poller::Poller] is a [`SnapshotSource`]. Components that only read the
//! resource can take a [`SharedSnapshotSource`] instead of the poller itself, which keeps them
//! unaware of who drives the refresh loop and lets tests hand them a fixed value.
//!
//! ```rust
//! # use freshet::{snapshot::{shared_source_from_static, SharedSnapshotSource}, Poller};
//! # use tokio_util::sync::CancellationToken;
//! fn banner(motd: &SharedSnapshotSource<String>) -> String {
//!     format!("*** {} ***", motd.latest_snapshot())
//! }
//!
//! let poller = Poller::new(
//!     |_ctx: CancellationToken| async { Ok::<_, std::io::Error>("hello".to_string()) },
//!     [],
//! )
//! .unwrap()
//! .into_shared();
//! let live: SharedSnapshotSource<String> = poller;
//! assert_eq!("***  ***", banner(&live));
//!
//! let fixed = shared_source_from_static("maintenance".to_string());
//! assert_eq!("*** maintenance ***", banner(&fixed));
//! ```

use std::sync::Arc;

pub use freshet_traits::snapshot::SnapshotSource;

/// A snapshot source that can be cloned and shared across tasks.
pub type SharedSnapshotSource<T> = Arc<dyn SnapshotSource<T> + Send + Sync>;

/// A source that never changes. Useful where a component expects a poller but the value is
/// known up front.
#[derive(Debug)]
pub struct StaticSource<T>(Arc<T>);

impl<T> StaticSource<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl<T> SnapshotSource<T> for StaticSource<T> {
    fn latest_snapshot(&self) -> Arc<T> {
        self.0.clone()
    }
}

/// Shorthand for wrapping a [`StaticSource`] as a [`SharedSnapshotSource`].
pub fn shared_source_from_static<T: Send + Sync + 'static>(value: T) -> SharedSnapshotSource<T> {
    Arc::new(StaticSource::new(value))
}
