use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};

use crate::error::RobotsError;
use crate::registry::{GetOptions, RobotsRegistry};

/// How a declared `Crawl-delay` is enforced before a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PacingMode {
    /// Proceed immediately, never consult the delay.
    Ignore,
    /// Suspend until the delay is met.
    #[default]
    Wait,
    /// Error out instead of waiting when the delay is unmet.
    FailFast,
}

/// What a pacing check did before letting the caller proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingOutcome {
    Proceeded,
    Waited(Duration),
}

struct WaitPlan {
    wait: Duration,
    delay_secs: f32,
}

impl PacingMode {
    /// Enforces this mode for the next request to `origin`.
    ///
    /// Only `Wait` introduces latency, and only for the computed remainder of
    /// the declared delay; suspension is per-origin and cooperative. A
    /// violation under `FailFast` is [`RobotsError::CrawlDelay`].
    pub async fn enforce(
        &self,
        registry: &RobotsRegistry,
        origin: &str,
        agent: &str,
    ) -> Result<PacingOutcome, RobotsError> {
        match self {
            Self::Ignore => Ok(PacingOutcome::Proceeded),
            Self::Wait => match compute_wait(registry, origin, agent).await? {
                Some(plan) if !plan.wait.is_zero() => {
                    log::debug!(
                        "pacing {origin}: waiting {}ms to honor crawl-delay of {}s",
                        plan.wait.as_millis(),
                        plan.delay_secs
                    );
                    sleep(plan.wait).await;
                    Ok(PacingOutcome::Waited(plan.wait))
                }
                _ => Ok(PacingOutcome::Proceeded),
            },
            Self::FailFast => match compute_wait(registry, origin, agent).await? {
                Some(plan) if !plan.wait.is_zero() => Err(RobotsError::CrawlDelay {
                    delay_secs: plan.delay_secs,
                }),
                _ => Ok(PacingOutcome::Proceeded),
            },
        }
    }
}

/// Remaining share of the origin's declared delay.
///
/// Reads the record through the cache-only path (a full fetch only happens
/// when the origin has no record at all). Zero when there is no declared
/// delay, no usable delay value, or no crawl history.
async fn compute_wait(
    registry: &RobotsRegistry,
    origin: &str,
    agent: &str,
) -> Result<Option<WaitPlan>, RobotsError> {
    let record = registry
        .get_robots(
            origin,
            agent,
            GetOptions {
                increment_usage: false,
                ignore_cache_policy: true,
            },
        )
        .await?;

    let Some(delay_secs) = record.rules.delay(agent) else {
        return Ok(None);
    };
    if !delay_secs.is_finite() || delay_secs <= 0.0 {
        return Ok(None);
    }
    let Some(last_crawled) = record.last_crawled else {
        return Ok(None);
    };

    let elapsed = Instant::now() - last_crawled;
    let wait = Duration::from_secs_f32(delay_secs).saturating_sub(elapsed);
    Ok(Some(WaitPlan { wait, delay_secs }))
}
