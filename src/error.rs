use thiserror::Error;

/// Failures surfaced by robots.txt compliance checks.
///
/// All variants are recoverable from the caller's point of view: a crawl loop
/// may log them, skip the URL and keep going.
#[derive(Debug, Error)]
pub enum RobotsError {
    /// The request target could not be resolved to a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request target resolved to a non-HTTP(S) scheme.
    #[error("invalid protocol `{0}`, only HTTP(S) can be checked against robots.txt")]
    InvalidProtocol(String),

    /// robots.txt could not be obtained for reasons other than a 4xx answer.
    ///
    /// Access must not be assumed in this state, so this aborts the current
    /// decision instead of defaulting to allow.
    #[error("unable to fetch robots.txt for {origin}: {source}")]
    Unreachable {
        origin: String,
        source: anyhow::Error,
    },

    /// The URL is disallowed by the origin's robots.txt.
    #[error("{url} is disallowed by robots.txt for user-agent {agent}")]
    Denied { url: String, agent: String },

    /// A fail-fast pacing check found the declared crawl-delay unmet.
    #[error("crawl-delay of {delay_secs}s has not been met")]
    CrawlDelay { delay_secs: f32 },
}
