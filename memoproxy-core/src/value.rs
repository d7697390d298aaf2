//! Encoding of cached payloads.
//!
//! The store only holds strings, so binary payloads go through standard
//! (padded) base64:
//!
//! - the body entry is `base64(body)`
//! - the header entry is `base64(json({name: [value, ...]}))`
//!
//! The header set keeps every value the origin sent, but only the first value
//! per name is replayed on a hit (see [`CachedHeaders::first_values`]).

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Error produced while decoding (or, rarely, encoding) a cached payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Stored value is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Stored header set is not a valid JSON mapping.
    #[error("invalid header set: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes a response body for storage.
pub fn encode_body(body: &[u8]) -> String {
    STANDARD.encode(body)
}

/// Decodes a stored response body.
pub fn decode_body(encoded: &str) -> Result<Bytes, CodecError> {
    Ok(Bytes::from(STANDARD.decode(encoded)?))
}

/// Header set as stored in the header entry: name to ordered values.
///
/// Names are stored lowercase (as [`http`] normalizes them). Values that are
/// not valid UTF-8 are stored lossily.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CachedHeaders(BTreeMap<String, Vec<String>>);

impl CachedHeaders {
    /// Captures every value of every header in `headers`.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers {
            map.entry(name.as_str().to_owned())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        Self(map)
    }

    /// JSON-encodes the header set, then base64-encodes the JSON.
    pub fn encode(&self) -> Result<String, CodecError> {
        let json = serde_json::to_vec(&self.0)?;
        Ok(STANDARD.encode(json))
    }

    /// Reverses [`CachedHeaders::encode`].
    pub fn decode(encoded: &str) -> Result<Self, CodecError> {
        let json = STANDARD.decode(encoded)?;
        Ok(serde_json::from_slice(&json)?)
    }

    /// Builds a header map holding only the first value of each header.
    ///
    /// Names or values that are not valid HTTP tokens are skipped with a
    /// warning, as are names with an empty value list.
    pub fn first_values(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.0.len());
        for (name, values) in &self.0 {
            let Some(first) = values.first() else {
                continue;
            };
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(first),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %name, "skipping cached header that is not valid HTTP"),
            }
        }
        headers
    }

    /// Returns all values recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no headers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for CachedHeaders {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_body_round_trip_binary() {
        let body: Vec<u8> = (0..=255).collect();
        let encoded = encode_body(&body);
        assert_eq!(decode_body(&encoded).unwrap(), Bytes::from(body));
    }

    #[test]
    fn test_body_round_trip_empty() {
        assert_eq!(encode_body(b""), "");
        assert!(decode_body("").unwrap().is_empty());
    }

    #[test]
    fn test_body_uses_padded_standard_alphabet() {
        assert_eq!(encode_body(br#"{"a":1}"#), "eyJhIjoxfQ==");
        assert_eq!(encode_body(&[0x00, 0xff, 0xfe]), "AP/+");
    }

    #[test]
    fn test_decode_body_rejects_garbage() {
        assert!(matches!(
            decode_body("not base64!"),
            Err(CodecError::Base64(_))
        ));
    }

    #[test]
    fn test_headers_round_trip_keeps_every_value() {
        let mut map = HeaderMap::new();
        map.insert("content-type", HeaderValue::from_static("application/json"));
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));

        let headers = CachedHeaders::from_header_map(&map);
        let decoded = CachedHeaders::decode(&headers.encode().unwrap()).unwrap();

        assert_eq!(decoded, headers);
        assert_eq!(
            decoded.get("set-cookie").unwrap(),
            &["a=1".to_owned(), "b=2".to_owned()]
        );
    }

    #[test]
    fn test_first_values_drops_later_values() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));
        map.insert("x-origin", HeaderValue::from_static("svc1"));

        let replayed = CachedHeaders::from_header_map(&map).first_values();

        assert_eq!(replayed.get_all("set-cookie").iter().count(), 1);
        assert_eq!(replayed.get("set-cookie").unwrap(), "a=1");
        assert_eq!(replayed.get("x-origin").unwrap(), "svc1");
    }

    #[test]
    fn test_decode_canonical_names() {
        // Header names written in canonical case by other writers still replay.
        let encoded = STANDARD.encode(br#"{"Content-Type":["application/json"]}"#);
        let replayed = CachedHeaders::decode(&encoded).unwrap().first_values();
        assert_eq!(replayed.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_first_values_skips_empty_and_invalid() {
        let mut raw = BTreeMap::new();
        raw.insert("x-empty".to_owned(), vec![]);
        raw.insert("bad header".to_owned(), vec!["v".to_owned()]);
        raw.insert("x-ok".to_owned(), vec!["1".to_owned()]);

        let replayed = CachedHeaders::from(raw).first_values();

        assert_eq!(replayed.len(), 1);
        assert_eq!(replayed.get("x-ok").unwrap(), "1");
    }

    #[test]
    fn test_decode_headers_rejects_non_json() {
        let encoded = STANDARD.encode(b"not json");
        assert!(matches!(
            CachedHeaders::decode(&encoded),
            Err(CodecError::Json(_))
        ));
    }
}
