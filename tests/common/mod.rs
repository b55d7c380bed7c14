//! In-process stand-in for the analytics backend.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// Only this user exists.
pub const KNOWN_USER: &str = "octocat";
/// A user whose endpoints answer 200 with a body that is not JSON.
pub const BROKEN_USER: &str = "broken";
/// A user whose endpoints answer 404 with an empty `detail`.
pub const BLANK_DETAIL_USER: &str = "blank";

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": format!("GitHub API error: 404 - {} not found", what) })),
    )
        .into_response()
}

fn blank_detail() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "" }))).into_response()
}

fn garbage() -> Response {
    (StatusCode::OK, "<html>not json</html>").into_response()
}

async fn user_repos(Path(username): Path<String>) -> Response {
    match username.as_str() {
        KNOWN_USER => Json(json!({
            "username": KNOWN_USER,
            "repositories": [
                {
                    "name": "hello-world",
                    "description": "My first repository",
                    "stars": 12,
                    "forks": 3,
                    "language": "Ruby",
                    "created_at": "2011-01-26T19:01:12Z",
                    "updated_at": "2024-03-05T10:00:00Z",
                    "url": "https://github.com/octocat/hello-world",
                    "topics": ["demo"]
                },
                {
                    "name": "spoon-knife",
                    "stars": 5,
                    "language": null
                }
            ]
        }))
        .into_response(),
        BROKEN_USER => garbage(),
        BLANK_DETAIL_USER => blank_detail(),
        other => not_found(other),
    }
}

async fn user_stats(Path(username): Path<String>) -> Response {
    match username.as_str() {
        KNOWN_USER => Json(json!({
            "username": KNOWN_USER,
            "repo_count": 2,
            "total_stars": 17,
            "total_forks": 3,
            "avg_stars": 8.5,
            "avg_forks": 1.5,
            "language_distribution": { "Ruby": 1, "Zig": 1 },
            "timeline": [
                { "date": "2011-01", "repos": 1 },
                { "date": "2014-06", "repos": 2 }
            ],
            "top_topics": { "demo": 1 },
            "repos_by_stars": [{ "name": "hello-world", "stars": 12 }]
        }))
        .into_response(),
        BROKEN_USER => garbage(),
        BLANK_DETAIL_USER => blank_detail(),
        other => not_found(other),
    }
}

async fn repo_details(Path((username, repo)): Path<(String, String)>) -> Response {
    if username != KNOWN_USER || repo != "hello-world" {
        return not_found(&format!("{}/{}", username, repo));
    }
    Json(json!({
        "name": "hello-world",
        "full_name": "octocat/hello-world",
        "stars": 12,
        "forks": 3,
        "open_issues": 1,
        "languages": { "Ruby": 2048, "Shell": 512 },
        "contributors": [{ "login": "octocat", "contributions": 42 }],
        "recent_commits": [{
            "sha": "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d",
            "message": "Merge pull request #6\n\nLong body",
            "author": "The Octocat",
            "date": "2012-03-06T23:06:50Z"
        }],
        "commit_frequency": { "2012-03": 1 },
        "weekly_commits": []
    }))
    .into_response()
}

pub fn router() -> Router {
    Router::new()
        .route("/api/user/:username", get(user_repos))
        .route("/api/stats/:username", get(user_stats))
        .route("/api/repo/:username/:repo", get(repo_details))
}

/// Serve the mock backend on an ephemeral port and return its API base URL.
pub async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    format!("http://{}/api", addr)
}
