//! Options accepted by [`Poller::new`].
//!
//! Options are applied in order and may fail, in which case construction is aborted. Besides the
//! built-in options, [`PollerOption::custom`] lets callers add their own, for example to derive
//! the period from the environment:
//!
//! ```rust
//! # use std::time::Duration;
//! # use freshet::{error::ConfigError, poller::{options::{with_update_period, PollerOption}, Poller}};
//! # use tokio_util::sync::CancellationToken;
//! fn period_from_env<T: 'static>(var: &'static str) -> PollerOption<T> {
//!     PollerOption::custom(move |poller| match std::env::var(var) {
//!         Ok(raw) => {
//!             let millis: u64 = raw.parse().map_err(ConfigError::custom)?;
//!             with_update_period(Duration::from_millis(millis)).apply(poller)
//!         }
//!         Err(_) => Ok(()),
//!     })
//! }
//!
//! let poller = Poller::new(
//!     |_ctx: CancellationToken| async { Ok::<_, std::io::Error>(1u8) },
//!     [period_from_env("FRESHET_DOC_UNSET_VARIABLE")],
//! )
//! .unwrap();
//! assert_eq!(Duration::from_secs(1), poller.update_period());
//! ```

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tokio::sync::watch;

use crate::{error::ConfigError, poller::Poller, poller::DEFAULT_UPDATE_PERIOD};

type ApplyFn<T> = Box<dyn FnOnce(&mut Poller<T>) -> Result<(), ConfigError> + Send>;

/// A single configuration step for a not yet started [`Poller`].
pub struct PollerOption<T> {
    apply: ApplyFn<T>,
}

impl<T: 'static> PollerOption<T> {
    /// Define an option from a closure. Returning an error aborts [`Poller::new`].
    pub fn custom<F>(apply: F) -> Self
    where
        F: FnOnce(&mut Poller<T>) -> Result<(), ConfigError> + Send + 'static,
    {
        Self {
            apply: Box::new(apply),
        }
    }

    /// Apply this option to `poller`. Mostly useful for composing options inside
    /// [`PollerOption::custom`].
    pub fn apply(self, poller: &mut Poller<T>) -> Result<(), ConfigError> {
        (self.apply)(poller)
    }
}

impl<T> fmt::Debug for PollerOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollerOption").finish_non_exhaustive()
    }
}

/// Set the delay between the end of one fetch and the start of the next. Must be non-zero.
pub fn with_update_period<T: 'static>(period: Duration) -> PollerOption<T> {
    PollerOption::custom(move |poller| {
        if period.is_zero() {
            return Err(ConfigError::ZeroUpdatePeriod);
        }
        poller.update_period = period;
        Ok(())
    })
}

/// Release `signal` (set it to `true`) after the first successful fetch of the refresh loop, or
/// when the loop stops without any fetch succeeding. Nothing useful is sent, waiters only need to
/// observe the change:
///
/// ```rust
/// # async fn wait(mut ready: tokio::sync::watch::Receiver<bool>) {
/// let _ = ready.wait_for(|done| *done).await;
/// # }
/// ```
///
/// A sender that has already been released is rejected.
pub fn with_first_poll_done<T: 'static>(signal: watch::Sender<bool>) -> PollerOption<T> {
    PollerOption::custom(move |poller| {
        if *signal.borrow() {
            return Err(ConfigError::ReadinessAlreadySignalled);
        }
        poller.first_poll_done = Some(signal);
        Ok(())
    })
}

/// Apply settings loaded from a configuration file.
pub fn with_settings<T: 'static>(settings: PollerSettings) -> PollerOption<T> {
    PollerOption::custom(move |poller| with_update_period(settings.update_period).apply(poller))
}

/// Serializable poller settings, for when the period comes from a config file.
///
/// ```rust
/// # use std::time::Duration;
/// # use freshet::poller::options::PollerSettings;
/// let settings: PollerSettings = serde_json::from_str(r#"{ "update_period_ms": 250 }"#).unwrap();
/// assert_eq!(Duration::from_millis(250), settings.update_period);
/// ```
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollerSettings {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "update_period_ms", default = "default_update_period")]
    pub update_period: Duration,
}

fn default_update_period() -> Duration {
    DEFAULT_UPDATE_PERIOD
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            update_period: DEFAULT_UPDATE_PERIOD,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use tokio_util::sync::CancellationToken;

    use super::*;

    fn fetcher(_ctx: CancellationToken) -> std::future::Ready<Result<String, io::Error>> {
        std::future::ready(Ok("fetched".to_string()))
    }

    #[test]
    fn zero_update_period_is_rejected() {
        let err = Poller::new(fetcher, [with_update_period(Duration::ZERO)]).unwrap_err();
        assert!(std::matches!(err, ConfigError::ZeroUpdatePeriod));
    }

    #[test]
    fn released_signal_is_rejected() {
        let (tx, _rx) = watch::channel(true);
        let err = Poller::new(fetcher, [with_first_poll_done(tx)]).unwrap_err();
        assert!(std::matches!(err, ConfigError::ReadinessAlreadySignalled));
    }

    #[test]
    fn failing_option_stops_later_options() {
        let reached = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = reached.clone();

        let result = Poller::new(
            fetcher,
            [
                PollerOption::custom(|_| Err(ConfigError::custom("no"))),
                PollerOption::custom(move |_| {
                    flag.store(true, std::sync::atomic::Ordering::SeqCst);
                    Ok(())
                }),
            ],
        );

        assert!(std::matches!(result, Err(ConfigError::Custom(_))));
        assert!(!reached.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn settings_set_update_period() {
        let settings = PollerSettings {
            update_period: Duration::from_millis(75),
        };
        let poller = Poller::new(fetcher, [with_settings(settings)]).unwrap();
        assert_eq!(Duration::from_millis(75), poller.update_period());
    }

    #[test]
    fn settings_default_matches_poller_default() {
        assert_eq!(DEFAULT_UPDATE_PERIOD, PollerSettings::default().update_period);
    }

    #[test]
    fn settings_missing_period_uses_default() {
        let settings: PollerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(PollerSettings::default(), settings);
    }

    #[test]
    fn settings_reject_unknown_fields() {
        assert!(serde_json::from_str::<PollerSettings>(r#"{ "period": 5 }"#).is_err());
    }

    #[test]
    fn settings_zero_period_fails_when_applied() {
        let settings: PollerSettings =
            serde_json::from_str(r#"{ "update_period_ms": 0 }"#).unwrap();
        let err = Poller::new(fetcher, [with_settings(settings)]).unwrap_err();
        assert!(std::matches!(err, ConfigError::ZeroUpdatePeriod));
    }

    #[test]
    fn settings_serialize_as_milliseconds() {
        let json = serde_json::to_string(&PollerSettings {
            update_period: Duration::from_millis(1500),
        })
        .unwrap();
        assert_eq!(r#"{"update_period_ms":1500}"#, json);
    }
}
