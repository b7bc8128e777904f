//! Robots exclusion and crawl-delay enforcement for web crawlers.
//!
//! Per-origin robots.txt caching with pluggable validity policies, and
//! crawl-delay pacing with pluggable compliance modes.

mod cache;
mod config;
mod error;
mod fetch;
mod origin;
mod pacing;
mod registry;
mod rules;
mod store;
mod warden;

pub use cache::{CachePolicy, CachePolicyConfig};
pub use config::WardenConfig;
pub use error::RobotsError;
pub use fetch::{HttpFetch, RobotsFetch, RobotsPayload};
pub use origin::{origin_of, resolve_target};
pub use pacing::{PacingMode, PacingOutcome};
pub use registry::{GetOptions, RobotsRegistry};
pub use rules::{RuleSet, ALLOW_ALL_ROBOTS_TXT, ROBOTS_TXT_FILE};
pub use store::{RobotsRecord, RobotsStore};
pub use warden::Warden;

pub use anyhow;
pub use url::Url;
