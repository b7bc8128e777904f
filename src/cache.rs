use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::store::RobotsRecord;

/// Declared cache-validity policy, as found in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachePolicyConfig {
    /// One of `indefinite`, `expireAfter`, `requestCount`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Window for `expireAfter`, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f32>,
    /// Consultation budget for `requestCount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_requests: Option<u32>,
}

impl Default for CachePolicyConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            duration_secs: None,
            max_requests: None,
        }
    }
}

fn default_kind() -> String {
    String::from("indefinite")
}

/// Decides whether a cached record may be reused without refetching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CachePolicy {
    /// A fetched record never goes stale.
    Indefinite,
    /// A record is valid strictly before `fetched_at + window`.
    ExpireAfter(Duration),
    /// A record is valid while `usage_count` is below the budget.
    RequestCount(u32),
}

impl CachePolicy {
    /// Selects the policy variant for a declared configuration.
    ///
    /// Fails closed: an unrecognized kind or a missing/unusable parameter
    /// logs a warning and caches indefinitely instead of erroring.
    pub fn from_config(config: &CachePolicyConfig) -> Self {
        match config.kind.as_str() {
            "indefinite" => Self::Indefinite,
            "expireAfter" => match config.duration_secs {
                Some(secs) if secs.is_finite() && secs > 0.0 => {
                    Self::ExpireAfter(Duration::from_secs_f32(secs))
                }
                _ => {
                    log::warn!("expireAfter policy without a positive durationSecs, caching indefinitely");
                    Self::Indefinite
                }
            },
            "requestCount" => match config.max_requests {
                Some(max) => Self::RequestCount(max),
                None => {
                    log::warn!("requestCount policy without maxRequests, caching indefinitely");
                    Self::Indefinite
                }
            },
            other => {
                log::warn!("unknown cache policy kind `{other}`, caching indefinitely");
                Self::Indefinite
            }
        }
    }

    pub fn is_valid(&self, record: &RobotsRecord, now: Instant) -> bool {
        match self {
            Self::Indefinite => true,
            Self::ExpireAfter(window) => now < record.fetched_at + *window,
            Self::RequestCount(max) => record.usage_count < *max,
        }
    }
}
