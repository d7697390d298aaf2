#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # memoproxy
//!
//! A cache-aside engine for a forwarding HTTP proxy. Responses are memoized
//! by the MD5 fingerprint of the request body: a request whose body matches
//! an earlier one is answered from the store without contacting the origin.
//!
//! The engine is transport-agnostic. It takes a buffered [`ProxyRequest`] and
//! returns a [`ProxyResponse`]; the HTTP server lives in `memoproxy-server`.
//!
//! ## Store layout
//!
//! | Key | Value | TTL |
//! |-----|-------|-----|
//! | `<fingerprint>` | base64 response body | [`PolicyConfig::body_ttl`] |
//! | `<fingerprint>-header` | base64 JSON `{name: [values]}` | [`PolicyConfig::header_ttl`] |
//! | `counter` | ping count | [`PolicyConfig::counter_ttl`] |
//!
//! The two response entries are written one after the other and may expire
//! independently.

/// Error types for cache operations.
///
/// Defines [`CacheError`] which covers:
/// - Origin mapping failures
/// - Store failures
/// - Origin failures
/// - Malformed cached payloads
pub mod error;

/// Hop-by-hop header filtering for forwarded requests and replayed responses.
pub mod headers;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, the engine records hit and miss
/// counters, degradations by kind and origin call latency.
pub mod metrics;

/// TTLs for store writes and the error policy of the front door.
pub mod policy;

/// Origin key to base URL resolution.
pub mod resolver;

mod engine;
mod liveness;

pub use engine::{ProxyCache, ProxyRequest, ProxyResponse};
pub use error::{CacheError, ErrorKind};
pub use liveness::LivenessCounter;
pub use policy::{ErrorPolicy, PolicyConfig};
pub use resolver::{OriginResolver, StaticOriginResolver};

pub use memoproxy_core::{CacheKey, CacheStatus, ResponseSource};
