//! [![github]](https://github.com/LittleBoxOfSunshine/freshet)&ensp;[![crates-io]](https://crates.io/crates/freshet_traits)&ensp;[![docs-rs]](https://docs.rs/freshet_traits)
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//! [docs-rs]: https://img.shields.io/badge/docs.rs-66c2a5?style=for-the-badge&labelColor=555555&logo=docs.rs
//!
//! <br>
//!
//! This is the collection of traits re-exported by the polling crate [`freshet`](https://crates.io/crates/freshet).
//! Each trait is usable in isolation, so alternate snapshot stores or fetch operations only need
//! this minimal dependency rather than the tokio based poller.

pub mod fetch;
pub mod snapshot;
