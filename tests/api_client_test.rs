mod common;

use crisphub::api::{ApiClient, ApiError};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

async fn client() -> ApiClient {
    let base_url = common::spawn_backend().await;
    ApiClient::new(&base_url).unwrap()
}

#[tokio::test]
async fn test_fetch_user_repos() {
    let client = client().await;

    let list = client.fetch_user_repos(common::KNOWN_USER).await.unwrap();

    assert_eq!(list.username.as_deref(), Some("octocat"));
    let names: Vec<&str> = list.repositories.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["hello-world", "spoon-knife"]);
    assert_eq!(list.repositories[1].language, None);
    assert_eq!(list.repositories[1].forks, 0);
}

#[tokio::test]
async fn test_fetch_user_stats_keeps_language_order() {
    let client = client().await;

    let stats = client.fetch_user_stats(common::KNOWN_USER).await.unwrap();

    let languages: Vec<&str> = stats.language_distribution.as_ref().unwrap().names().collect();
    assert_eq!(languages, vec!["Ruby", "Zig"]);
    assert_eq!(stats.timeline.len(), 2);
    assert_eq!(stats.repos_by_stars[0].stars, 12);
}

#[tokio::test]
async fn test_fetch_repo_details() {
    let client = client().await;

    let detail = client
        .fetch_repo_details(common::KNOWN_USER, "hello-world")
        .await
        .unwrap();

    assert_eq!(detail.full_name.as_deref(), Some("octocat/hello-world"));
    assert_eq!(detail.languages.get("Ruby"), Some(2048));
    assert_eq!(detail.contributors[0].contributions, 42);
    assert_eq!(detail.recent_commits[0].headline(), "Merge pull request #6");
    assert_eq!(detail.recent_commits[0].short_sha(), "7fd1a60");
}

#[tokio::test]
async fn test_not_found_carries_backend_detail() {
    let client = client().await;

    let err = client.fetch_user_repos("ghost").await.unwrap_err();

    match &err {
        ApiError::Status { status, .. } => assert_eq!(*status, StatusCode::NOT_FOUND),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(
        err.user_message(),
        "GitHub API error: 404 - ghost not found"
    );
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let client = client().await;

    let err = client.fetch_user_stats(common::BROKEN_USER).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_unreachable_backend_is_request_error() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ApiClient::new(&format!("http://{}/api", addr)).unwrap();

    let err = client.fetch_user_repos("octocat").await.unwrap_err();

    assert!(matches!(err, ApiError::Request { .. }), "{:?}", err);
}
