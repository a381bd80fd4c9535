//! [![github]](https://github.com/LittleBoxOfSunshine/freshet)&ensp;[![crates-io]](https://crates.io/crates/freshet)&ensp;[![docs-rs]](https://docs.rs/freshet)
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//! [docs-rs]: https://img.shields.io/badge/docs.rs-66c2a5?style=for-the-badge&labelColor=555555&logo=docs.rs
//!
//! <br>
//!
//! Freshet keeps a value fresh in the background. A [`Poller`][poller::Poller] calls a
//! caller-supplied fetch operation on a fixed period and serves the most recent successful
//! result to any number of readers through:
//!
//! - Static typing (the poller is generic over the resource type)
//! - Atomic, lock-free snapshot swaps, so readers never see a partial value
//! - A single refresh loop per poller, no matter how many callers try to start it
//! - An optional readiness signal released after the first successful fetch
//!
//! # Concepts, Usage, and Examples
//!
//! See the module documentation for each concept:
//!
//! - Polling: [`poller`]
//! - Sharing snapshots between components: [`snapshot`]
//! - Failures: [`error`]
//!
//! # Non-goals
//!
//! The poller does not retry with backoff, expire stale values, validate what it fetches, or
//! persist anything. A fetch that keeps failing leaves the last good value (or the default) in
//! place while the loop keeps trying every period. Timeouts belong to the fetch operation, which
//! receives the caller's [`CancellationToken`][tokio_util::sync::CancellationToken].

pub mod error;
pub mod poller;
pub mod snapshot;

pub use error::{ConfigError, FetchError};
pub use poller::{
    options::{with_first_poll_done, with_settings, with_update_period, PollerOption, PollerSettings},
    Poller,
};
