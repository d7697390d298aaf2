//! Redis store backend for memoproxy.
//!
//! ```no_run
//! use memoproxy_redis::RedisBackend;
//!
//! # fn main() -> Result<(), memoproxy_redis::error::Error> {
//! let backend = RedisBackend::builder()
//!     .server("redis://127.0.0.1:6379/")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

pub mod backend;
pub mod error;

#[doc(inline)]
pub use crate::backend::{RedisBackend, RedisBackendBuilder};
