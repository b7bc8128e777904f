use tokio::time::Instant;
use url::Url;

use crate::cache::CachePolicy;
use crate::config::WardenConfig;
use crate::error::RobotsError;
use crate::fetch::{HttpFetch, RobotsFetch};
use crate::origin::{origin_of, resolve_target};
use crate::pacing::PacingOutcome;
use crate::registry::{GetOptions, RobotsRegistry};

/// Robots exclusion and crawl pacing for outbound requests.
///
/// One `Warden` owns its directive cache; drop it and the cache is gone.
/// Construct one per crawl and call [`check`](Self::check) (or
/// [`is_allowed`](Self::is_allowed)) plus
/// [`enforce_pacing`](Self::enforce_pacing) before each request, then
/// [`record_crawl`](Self::record_crawl) after every attempt, success or not.
pub struct Warden {
    config: WardenConfig,
    registry: RobotsRegistry,
}

impl Warden {
    /// Warden fetching robots.txt over HTTP.
    pub fn new(config: WardenConfig) -> Self {
        Self::with_fetcher(config, Box::new(HttpFetch))
    }

    /// Warden with an injected robots.txt fetcher.
    pub fn with_fetcher(config: WardenConfig, fetcher: Box<dyn RobotsFetch>) -> Self {
        let policy = CachePolicy::from_config(&config.cache_policy);
        Self {
            registry: RobotsRegistry::new(policy, fetcher),
            config,
        }
    }

    pub fn config(&self) -> &WardenConfig {
        &self.config
    }

    pub fn registry(&self) -> &RobotsRegistry {
        &self.registry
    }

    /// Whether the configured agent may request `url`.
    ///
    /// Errors on invalid targets and on unreachable robots.txt; the latter is
    /// never downgraded to an allow.
    pub async fn is_allowed(&self, url: &str) -> Result<bool, RobotsError> {
        let target = resolve_target(url, None)?;
        self.decide(&target).await
    }

    /// Validates `url` and returns it resolved when the request may proceed.
    ///
    /// The full pre-request gate: malformed targets and non-HTTP(S) schemes
    /// are rejected before any robots.txt work, then the access decision
    /// runs; a disallowed target is [`RobotsError::Denied`].
    pub async fn check(&self, url: &str) -> Result<Url, RobotsError> {
        self.check_with_base(url, None).await
    }

    /// Like [`check`](Self::check), resolving relative targets against `base`.
    pub async fn check_with_base(
        &self,
        url: &str,
        base: Option<&Url>,
    ) -> Result<Url, RobotsError> {
        let target = resolve_target(url, base)?;
        if self.decide(&target).await? {
            Ok(target)
        } else {
            Err(RobotsError::Denied {
                url: target.to_string(),
                agent: self.config.user_agent.clone(),
            })
        }
    }

    /// Enforces the configured pacing mode for the next request to `url`'s
    /// origin.
    pub async fn enforce_pacing(&self, url: &str) -> Result<PacingOutcome, RobotsError> {
        let target = resolve_target(url, None)?;
        let origin = origin_of(&target);
        self.config
            .pacing
            .enforce(&self.registry, &origin, &self.config.user_agent)
            .await
    }

    /// Records a request attempt to `url`'s origin as of now.
    pub fn record_crawl(&self, url: &str) -> Result<(), RobotsError> {
        self.record_crawl_at(url, Instant::now())
    }

    /// Records a request attempt to `url`'s origin at `at`.
    pub fn record_crawl_at(&self, url: &str, at: Instant) -> Result<(), RobotsError> {
        let target = resolve_target(url, None)?;
        self.registry.record_crawl(&origin_of(&target), at);
        Ok(())
    }

    async fn decide(&self, target: &Url) -> Result<bool, RobotsError> {
        let origin = origin_of(target);
        let record = self
            .registry
            .get_robots(&origin, &self.config.user_agent, GetOptions::default())
            .await?;
        Ok(record.rules.allowed(target.as_str(), &self.config.user_agent))
    }
}
