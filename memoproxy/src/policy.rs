use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, ErrorKind};

const DEFAULT_BODY_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_HEADER_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_COUNTER_TTL: Duration = Duration::from_secs(5 * 60 * 60);

fn default_body_ttl() -> Duration {
    DEFAULT_BODY_TTL
}

fn default_header_ttl() -> Duration {
    DEFAULT_HEADER_TTL
}

fn default_counter_ttl() -> Duration {
    DEFAULT_COUNTER_TTL
}

/// Expiration applied to every store write.
///
/// Durations are humantime strings in configuration (`24h`, `90m`, `500ms`).
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyConfig {
    /// TTL of the body entry (`<fingerprint>`).
    #[serde(default = "default_body_ttl", with = "humantime_serde")]
    pub body_ttl: Duration,
    /// TTL of the header entry (`<fingerprint>-header`).
    #[serde(default = "default_header_ttl", with = "humantime_serde")]
    pub header_ttl: Duration,
    /// TTL of the liveness counter, refreshed on every ping.
    #[serde(default = "default_counter_ttl", with = "humantime_serde")]
    pub counter_ttl: Duration,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            body_ttl: DEFAULT_BODY_TTL,
            header_ttl: DEFAULT_HEADER_TTL,
            counter_ttl: DEFAULT_COUNTER_TTL,
        }
    }
}

/// How degradations affect the status code the caller sends back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Always answer with the best-effort response.
    #[default]
    Degrade,
    /// Surface configuration, origin and decode failures to the client.
    ///
    /// Store failures are never surfaced: the response content is still
    /// correct without the store.
    Strict,
}

impl ErrorPolicy {
    /// Returns the degradation that should replace the response, if any.
    pub fn escalate<'a>(&self, degradations: &'a [CacheError]) -> Option<&'a CacheError> {
        match self {
            ErrorPolicy::Degrade => None,
            ErrorPolicy::Strict => degradations
                .iter()
                .find(|error| error.kind() != ErrorKind::StoreUnavailable),
        }
    }
}
