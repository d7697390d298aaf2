//! Connection-scoped header handling.
//!
//! Hop-by-hop headers describe a single connection. They are captured into
//! the header entry as the origin sent them, but never forwarded to the
//! origin nor replayed to the client.

use http::HeaderMap;
use http::header::{self, HeaderName};

/// Headers that only make sense on the connection they arrived on.
pub const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    HeaderName::from_static("proxy-connection"),
    header::TE,
    header::TRAILER,
];

/// Whether `name` is a hop-by-hop header.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name)
}

/// Inbound headers to copy onto the origin request.
///
/// `host` and `content-length` are recomputed by the HTTP client.
pub fn outbound(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if name == header::HOST || name == header::CONTENT_LENGTH || is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// Removes hop-by-hop headers from a response about to be sent to the client.
///
/// Every other header is kept as the origin sent it, `content-length`
/// included. An entry stored from a `HEAD` answer therefore replays the
/// origin's length next to an empty body.
pub fn replayable(mut headers: HeaderMap) -> HeaderMap {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
    headers
}
