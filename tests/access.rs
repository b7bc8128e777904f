mod common;

use std::sync::atomic::Ordering;

use common::{warden, warden_with_config, Stub, StubFetch};
use crawl_warden::{RobotsError, Url, WardenConfig};

const ROBOTS: &str = "User-agent: *\nDisallow: /private\n";

#[tokio::test]
async fn disallowed_path_is_denied_and_the_rest_allowed() {
    let (warden, _) = warden(StubFetch::body(ROBOTS));

    assert!(!warden
        .is_allowed("https://example.com/private")
        .await
        .unwrap());
    assert!(!warden
        .is_allowed("https://example.com/private/reports/q1")
        .await
        .unwrap());
    assert!(warden.is_allowed("https://example.com/public").await.unwrap());
}

#[tokio::test]
async fn check_turns_a_denial_into_an_error() {
    let (warden, _) = warden(StubFetch::body(ROBOTS));

    let url = warden.check("https://example.com/public").await.unwrap();
    assert_eq!("https://example.com/public", url.as_str());

    let err = warden.check("https://example.com/private").await.unwrap_err();
    assert!(matches!(
        err,
        RobotsError::Denied { url, agent }
            if url == "https://example.com/private" && agent == "WardenBot"
    ));
}

#[tokio::test]
async fn check_with_base_resolves_relative_targets() {
    let (warden, _) = warden(StubFetch::body(ROBOTS));
    let base = Url::parse("https://example.com/docs/").unwrap();

    let url = warden
        .check_with_base("guide.html", Some(&base))
        .await
        .unwrap();
    assert_eq!("https://example.com/docs/guide.html", url.as_str());
}

#[tokio::test]
async fn missing_robots_txt_allows_everything() {
    let (warden, fetches) = warden(StubFetch::unavailable(404));

    assert!(warden
        .is_allowed("https://example.com/private")
        .await
        .unwrap());
    assert!(warden.is_allowed("https://example.com/admin").await.unwrap());
    assert_eq!(1, fetches.load(Ordering::SeqCst));
}

#[tokio::test]
async fn forbidden_robots_txt_allows_everything() {
    let (warden, _) = warden(StubFetch::unavailable(403));

    assert!(warden
        .is_allowed("https://example.com/private")
        .await
        .unwrap());
}

#[tokio::test]
async fn unreachable_robots_txt_is_an_error_not_an_allow() {
    let (warden, _) = warden(StubFetch::failing("connection refused"));

    let err = warden.is_allowed("https://example.com/page").await.unwrap_err();
    assert!(matches!(
        err,
        RobotsError::Unreachable { origin, .. } if origin == "https://example.com"
    ));

    // Pacing decisions for the origin fail the same way.
    let err = warden.enforce_pacing("https://example.com/page").await.unwrap_err();
    assert!(matches!(err, RobotsError::Unreachable { .. }));
}

#[tokio::test]
async fn unreachable_fetches_cache_nothing() {
    let (warden, fetches) = warden(StubFetch::sequence(vec![
        Stub::Fail("connection reset"),
        Stub::Body(ROBOTS),
    ]));

    warden.is_allowed("https://example.com/a").await.unwrap_err();
    assert!(warden.registry().cached("https://example.com").is_none());

    // The next consultation retries instead of reusing a failed state.
    assert!(warden.is_allowed("https://example.com/a").await.unwrap());
    assert_eq!(2, fetches.load(Ordering::SeqCst));
}

#[tokio::test]
async fn malformed_target_aborts_before_any_fetch() {
    let (warden, fetches) = warden(StubFetch::body(ROBOTS));

    let err = warden.is_allowed("http://").await.unwrap_err();
    assert!(matches!(err, RobotsError::InvalidUrl(_)));

    let err = warden.record_crawl("no scheme at all").unwrap_err();
    assert!(matches!(err, RobotsError::InvalidUrl(_)));

    assert_eq!(0, fetches.load(Ordering::SeqCst));
}

#[tokio::test]
async fn non_http_target_aborts_before_any_fetch() {
    let (warden, fetches) = warden(StubFetch::body(ROBOTS));

    let err = warden.is_allowed("ftp://example.com/file").await.unwrap_err();
    assert!(matches!(err, RobotsError::InvalidProtocol(p) if p == "ftp"));
    assert_eq!(0, fetches.load(Ordering::SeqCst));
}

#[tokio::test]
async fn agent_specific_groups_apply() {
    let robots = "User-agent: *\nAllow: /\n\nUser-agent: GreedyBot\nDisallow: /\n";
    let config = WardenConfig {
        user_agent: String::from("GreedyBot"),
        ..Default::default()
    };
    let (warden, _) = warden_with_config(config, StubFetch::body(robots));

    assert!(!warden.is_allowed("https://example.com/page").await.unwrap());
}

#[tokio::test]
async fn one_record_serves_all_urls_of_an_origin() {
    let (warden, fetches) = warden(StubFetch::body(ROBOTS));

    assert!(warden.is_allowed("https://example.com/a").await.unwrap());
    assert!(warden.is_allowed("HTTPS://EXAMPLE.com:443/b").await.unwrap());
    assert!(warden.is_allowed("https://example.com/c?page=2").await.unwrap());
    assert_eq!(1, fetches.load(Ordering::SeqCst));
}
