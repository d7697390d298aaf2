#![warn(missing_docs)]
//! # memoproxy-core
//!
//! Core types shared by every memoproxy crate.
//!
//! memoproxy answers a request from the store when an earlier request carried
//! a bit-identical body. This crate holds the pieces that every layer agrees on:
//!
//! - **Derive** a cache key from a request body ([`fingerprint`], [`CacheKey`])
//! - **Encode** response bodies and header sets for a string-only store ([`value`])
//! - **Call** the origin ([`Upstream`])
//! - **Report** whether a response came from the store ([`CacheStatus`])

pub mod context;
pub mod fingerprint;
pub mod key;
pub mod label;
pub mod upstream;
pub mod value;

pub use context::{CacheStatus, ResponseSource};
pub use fingerprint::{Fingerprint, fingerprint};
pub use key::CacheKey;
pub use label::BackendLabel;
pub use upstream::{OriginRequest, OriginResponse, Upstream, UpstreamError};
pub use value::{CachedHeaders, CodecError, decode_body, encode_body};
