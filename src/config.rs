use serde::{Deserialize, Serialize};

use crate::cache::CachePolicyConfig;
use crate::pacing::PacingMode;

/// Configuration for a [`Warden`](crate::Warden).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardenConfig {
    /// Agent identity used to select rule groups, pick the crawl-delay, and
    /// fetch robots.txt.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How crawl-delay directives are enforced.
    #[serde(default)]
    pub pacing: PacingMode,

    /// When cached robots.txt data must be refreshed.
    #[serde(default)]
    pub cache_policy: CachePolicyConfig,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            pacing: PacingMode::default(),
            cache_policy: CachePolicyConfig::default(),
        }
    }
}

fn default_user_agent() -> String {
    String::from("WardenBot")
}
