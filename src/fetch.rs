use anyhow::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::header::USER_AGENT;

use crate::rules::ROBOTS_TXT_FILE;

lazy_static! {
    static ref HTTP_CLI: reqwest::Client = reqwest::ClientBuilder::new()
        .gzip(true)
        .deflate(true)
        .build()
        .unwrap();
}

/// Outcome of a robots.txt retrieval attempt that got an HTTP answer.
#[derive(Debug, Clone)]
pub enum RobotsPayload {
    /// The origin served a robots.txt body.
    Body(String),
    /// The origin answered, but the resource itself is absent or forbidden
    /// (any 4xx). Distinct from transport failures: this class means the
    /// caller may substitute allow-all rules.
    Unavailable { status: u16 },
}

/// Retrieves the raw robots.txt of an origin.
///
/// Implementations must keep the 4xx class separate from every other failure;
/// server errors, network failures and the like are plain `Err` and callers
/// treat them as "directives unreachable".
#[async_trait]
pub trait RobotsFetch: Send + Sync {
    async fn fetch(&self, origin: &str, agent: &str) -> Result<RobotsPayload>;
}

/// Production fetcher: GET `{origin}/robots.txt` with `agent` as User-Agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetch;

#[async_trait]
impl RobotsFetch for HttpFetch {
    async fn fetch(&self, origin: &str, agent: &str) -> Result<RobotsPayload> {
        let robots_url = format!("{origin}/{ROBOTS_TXT_FILE}");
        let resp = HTTP_CLI
            .get(&robots_url)
            .header(USER_AGENT, agent)
            .send()
            .await?;

        let status = resp.status();
        if status.is_client_error() {
            return Ok(RobotsPayload::Unavailable {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            anyhow::bail!("{robots_url} answered {status}");
        }

        Ok(RobotsPayload::Body(resp.text().await?))
    }
}
