//! Gravatar lookups against a mock avatar service.
//!
//! The checker uses the blocking reqwest client, which must not run or be
//! dropped on an async worker, so every checker lives inside `spawn_blocking`.

use newsdesk_excerpt::gravatar::{gravatar_hash, GravatarChecker};
use newsdesk_excerpt::ExcerptError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMAIL: &str = "Ann@News.Example";

fn avatar_path(email: &str) -> String {
    format!("/avatar/{}", gravatar_hash(email))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_existing_gravatar_is_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path(avatar_path(EMAIL)))
        .and(query_param("d", "404"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let (first, second, cache_len) = tokio::task::spawn_blocking(move || {
        let checker = GravatarChecker::with_base_url(base_url).expect("client creation");
        let first = checker.has_gravatar(EMAIL).expect("first lookup");
        // Same address, different spelling: served from the cache
        let second = checker.has_gravatar("  ann@news.example").expect("second lookup");
        (first, second, checker.cache_len())
    })
    .await
    .expect("blocking task");

    assert!(first);
    assert!(second);
    assert_eq!(cache_len, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_gravatar_is_false_and_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path(avatar_path(EMAIL)))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let (found, cached) = tokio::task::spawn_blocking(move || {
        let checker = GravatarChecker::with_base_url(base_url).expect("client creation");
        let found = checker.has_gravatar(EMAIL).expect("lookup");
        (found, checker.cached(EMAIL))
    })
    .await
    .expect("blocking task");

    assert!(!found);
    assert_eq!(cached, Some(false));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_errors_are_retried_and_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let (result, cache_len) = tokio::task::spawn_blocking(move || {
        let checker = GravatarChecker::with_base_url(base_url).expect("client creation");
        let result = checker.has_gravatar(EMAIL);
        (result, checker.cache_len())
    })
    .await
    .expect("blocking task");

    let err = result.expect_err("503 should fail the lookup");
    match err {
        ExcerptError::GravatarLookup { hash, source } => {
            assert_eq!(hash, gravatar_hash(EMAIL));
            assert!(matches!(
                *source,
                ExcerptError::RetriesExhausted { attempts: 3, .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(cache_len, 0);

    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_only_200_counts_as_a_gravatar() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let found = tokio::task::spawn_blocking(move || {
        let checker = GravatarChecker::with_base_url(base_url).expect("client creation");
        checker.has_gravatar(EMAIL).expect("lookup")
    })
    .await
    .expect("blocking task");

    assert!(!found);
}
