//! Origin dispatch for memoproxy over [`reqwest`].
//!
//! [`ReqwestUpstream`] implements [`memoproxy_core::Upstream`]: it sends the
//! buffered request to the origin URL and buffers the whole response body.
//!
//! ```no_run
//! use std::time::Duration;
//! use memoproxy_reqwest::ReqwestUpstream;
//!
//! let upstream = ReqwestUpstream::new(reqwest::Client::new())
//!     .with_timeout(Duration::from_secs(30));
//! ```

mod upstream;

pub use upstream::ReqwestUpstream;
