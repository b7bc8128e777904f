use std::sync::Arc;

use tokio::time::Instant;

use crate::cache::CachePolicy;
use crate::error::RobotsError;
use crate::fetch::{RobotsFetch, RobotsPayload};
use crate::rules::RuleSet;
use crate::store::{RobotsRecord, RobotsStore};

/// Retrieval options for [`RobotsRegistry::get_robots`].
#[derive(Debug, Clone, Copy)]
pub struct GetOptions {
    /// Count this consultation against the record's usage budget.
    pub increment_usage: bool,
    /// Return any existing record as-is, skipping the validity check and the
    /// usage increment. Reads that only need bookkeeping state (pacing) use
    /// this so they cannot trigger a refetch.
    pub ignore_cache_policy: bool,
}

impl Default for GetOptions {
    fn default() -> Self {
        Self {
            increment_usage: true,
            ignore_cache_policy: false,
        }
    }
}

/// Per-origin robots.txt registry: cache consultation, validity checking,
/// refresh, and crawl-timestamp bookkeeping.
pub struct RobotsRegistry {
    store: RobotsStore,
    policy: CachePolicy,
    fetcher: Box<dyn RobotsFetch>,
}

impl RobotsRegistry {
    pub fn new(policy: CachePolicy, fetcher: Box<dyn RobotsFetch>) -> Self {
        Self {
            store: RobotsStore::new(),
            policy,
            fetcher,
        }
    }

    /// Current record for `origin`, fetching or refreshing per the cache
    /// policy and `options`.
    ///
    /// A fetch answered with 4xx substitutes allow-all rules; any other fetch
    /// failure is [`RobotsError::Unreachable`] and caches nothing. Refreshes
    /// replace the record wholesale but keep its pacing history.
    pub async fn get_robots(
        &self,
        origin: &str,
        agent: &str,
        options: GetOptions,
    ) -> Result<RobotsRecord, RobotsError> {
        if let Some(record) = self.store.get(origin) {
            if options.ignore_cache_policy {
                return Ok(record);
            }
            if self.policy.is_valid(&record, Instant::now()) {
                if options.increment_usage {
                    self.store.increment_usage(origin);
                }
                return Ok(record);
            }
            log::debug!("cached robots.txt for {origin} is stale under {:?}", self.policy);
        }

        self.refresh(origin, agent).await
    }

    async fn refresh(&self, origin: &str, agent: &str) -> Result<RobotsRecord, RobotsError> {
        let rules = match self.fetcher.fetch(origin, agent).await {
            Ok(RobotsPayload::Body(body)) => {
                RuleSet::parse(agent, body).map_err(|source| RobotsError::Unreachable {
                    origin: origin.to_string(),
                    source,
                })?
            }
            Ok(RobotsPayload::Unavailable { status }) => {
                log::debug!("no robots.txt at {origin} ({status}), allowing everything");
                RuleSet::allow_all(agent)
            }
            Err(source) => {
                return Err(RobotsError::Unreachable {
                    origin: origin.to_string(),
                    source,
                })
            }
        };

        // Re-read after the fetch await: a crawl recorded for this origin in
        // the meantime must survive the refresh.
        let last_crawled = self.store.get(origin).and_then(|r| r.last_crawled);
        let record = RobotsRecord {
            rules: Arc::new(rules),
            fetched_at: Instant::now(),
            last_crawled,
            usage_count: 0,
        };
        self.store.put(origin.to_string(), record.clone());

        Ok(record)
    }

    /// Stamps the most recent request attempt to `origin`. No-op when the
    /// origin has no record yet.
    pub fn record_crawl(&self, origin: &str, at: Instant) {
        self.store.touch_last_crawled(origin, at);
    }

    /// Raw cached record, without consulting the policy or the fetcher.
    pub fn cached(&self, origin: &str) -> Option<RobotsRecord> {
        self.store.get(origin)
    }
}
