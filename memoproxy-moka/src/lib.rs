//! In-memory store backend for memoproxy, powered by [Moka](https://docs.rs/moka).
//!
//! Useful for single-instance deployments and for running the proxy without
//! an external store. Entries honour the TTL passed to each write.
#![warn(missing_docs)]

mod backend;
mod builder;

pub use backend::MokaBackend;
pub use builder::MokaBackendBuilder;
