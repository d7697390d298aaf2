// #![warn(missing_docs)]
//! Traits and structs for memoproxy store interaction.
//!
//! If you want to plug in your own key-value store, you are in the right place:
//! implement [`Backend`] and hand it to the engine.
mod backend;
mod error;

pub use backend::{Backend, BackendResult};
pub use error::BackendError;
pub use memoproxy_core::{BackendLabel, CacheKey};
