//! Errors raised while building a [`Poller`][crate::poller::Poller] or refreshing its snapshot.

pub use freshet_traits::fetch::BoxError;

/// Error returned when an option cannot be applied during [`Poller::new`][crate::poller::Poller::new].
/// No poller is produced when construction fails.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Update period must be greater than zero")]
    ZeroUpdatePeriod,
    #[error("The readiness signal has already fired, it can only be released once")]
    ReadinessAlreadySignalled,
    #[error("Cannot apply option to poller: {0}")]
    Custom(#[source] BoxError),
}

impl ConfigError {
    /// Wrap an arbitrary failure raised by a [`PollerOption::custom`][crate::poller::options::PollerOption::custom] option.
    pub fn custom(err: impl Into<BoxError>) -> Self {
        Self::Custom(err.into())
    }
}

/// Error returned when the fetch operation fails. The previous snapshot is left in place.
#[derive(thiserror::Error, Debug)]
#[error("Resource fetch failed: {0}")]
pub struct FetchError(#[source] BoxError);

impl FetchError {
    pub(crate) fn new(cause: BoxError) -> Self {
        Self(cause)
    }

    /// Take back the failure returned by the fetch operation.
    pub fn into_cause(self) -> BoxError {
        self.0
    }
}
