//! Request body fingerprinting.
//!
//! The fingerprint is the MD5 digest of the raw request body, nothing else.
//! Method, path, query string and headers do not take part, so two requests
//! that differ only in those collide on purpose: the proxy treats every origin
//! as a pure function from body to response.
//!
//! ```
//! use memoproxy_core::fingerprint;
//!
//! let fp = fingerprint(b"");
//! assert_eq!(fp.to_string(), "d41d8cd98f00b204e9800998ecf8427e");
//! ```

use std::fmt;

use md5::{Digest, Md5};

/// A 128-bit digest of a request body.
///
/// Displays as 32 lowercase hex characters. The digest is unsalted, so the
/// same body maps to the same fingerprint across processes and restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Returns the digest as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Computes the fingerprint of a request body.
///
/// Never fails: empty and arbitrary binary input are both valid.
pub fn fingerprint(body: &[u8]) -> Fingerprint {
    let digest = Md5::digest(body);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Fingerprint(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        assert_eq!(
            fingerprint(b"").to_hex(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_json_body() {
        assert_eq!(
            fingerprint(br#"{"a":1}"#).to_string(),
            "bb6cb5c68df4652941caf652a366f2d8"
        );
    }

    #[test]
    fn test_binary_body() {
        assert_eq!(
            fingerprint(&[0x00, 0xff, 0xfe]).to_hex(),
            "e9fa623fb6877bfc89247b3d6f7cf5fc"
        );
    }

    #[test]
    fn test_deterministic() {
        let body = b"the same bytes every time";
        let first = fingerprint(body);
        for _ in 0..16 {
            assert_eq!(fingerprint(body), first);
        }
    }

    #[test]
    fn test_distinct_bodies() {
        assert_ne!(fingerprint(b"hello"), fingerprint(b"hello "));
    }

    #[test]
    fn test_hex_shape() {
        let hex = fingerprint(b"hello").to_hex();
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
