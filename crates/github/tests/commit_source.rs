//! GitHub commit source tests against a fake REST API.
//!
//! # What this covers
//!
//! - Request: path, `sha`/`per_page` query, accept header, token auth.
//! - Flattening of the nested commit shape, including a missing author.
//! - The JSON handed to the normalizer cleans like stdin input would.
//! - Error mapping for non-2xx and undecodable bodies.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use github::{GithubCommitSource, GithubConfig};
use pipeline::{clean_commit_messages, BranchName, CommitSource, RepositoryId, SourceError};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Default)]
struct Seen {
    query: Option<String>,
    accept: Option<String>,
    auth: Option<String>,
}

struct FakeGithub {
    status: StatusCode,
    body: String,
    seen: Mutex<Seen>,
}

async fn list_commits(
    State(fake): State<Arc<FakeGithub>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    *fake.seen.lock().unwrap() = Seen {
        query,
        accept: header("accept"),
        auth: header("authorization"),
    };
    (fake.status, fake.body.clone())
}

async fn start_fake(status: StatusCode, body: String) -> (String, Arc<FakeGithub>) {
    let fake = Arc::new(FakeGithub {
        status,
        body,
        seen: Mutex::new(Seen::default()),
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/repos/acme/widgets/commits", get(list_commits))
        .with_state(fake.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), fake)
}

fn source(api_base: String, token: Option<&str>) -> GithubCommitSource {
    GithubCommitSource::new(GithubConfig {
        api_base,
        repository: RepositoryId::parse("acme/widgets").unwrap(),
        branch: BranchName::new("main").unwrap(),
        per_page: 20,
        token: token.map(str::to_string),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn sample_commits() -> String {
    json!([
        {
            "sha": "9fceb02d0ae598e95dc970b74767f19372d61af8",
            "commit": {
                "message": "Add CSV export (#31)\n\nchore: regenerate lockfile",
                "author": {"name": "Ada Lovelace", "email": "ada@example.com", "date": "2024-03-01T10:00:00Z"}
            },
            "author": {"login": "ada"}
        },
        {
            "sha": "e5bd3914e2e596debea16f433f57875b5b90bcd6",
            "commit": {"message": "Fix crash on save", "author": null},
            "author": null
        }
    ])
    .to_string()
}

#[tokio::test]
async fn requests_branch_history_with_headers_and_token() {
    let (base, fake) = start_fake(StatusCode::OK, sample_commits()).await;

    let records = source(base, Some("ghp_test")).fetch_commits().await.unwrap();

    assert_eq!(records.len(), 2);
    let seen = fake.seen.lock().unwrap();
    assert_eq!(seen.query.as_deref(), Some("sha=main&per_page=20"));
    assert_eq!(seen.accept.as_deref(), Some("application/vnd.github.v3+json"));
    assert_eq!(seen.auth.as_deref(), Some("token ghp_test"));
}

#[tokio::test]
async fn flattens_nested_commits() {
    let (base, fake) = start_fake(StatusCode::OK, sample_commits()).await;

    let records = source(base, None).fetch_commits().await.unwrap();

    assert_eq!(records[0].sha.as_deref(), Some("9fceb02d0ae598e95dc970b74767f19372d61af8"));
    assert_eq!(records[0].author.as_deref(), Some("Ada Lovelace"));
    assert_eq!(records[0].date.as_deref(), Some("2024-03-01T10:00:00Z"));
    assert_eq!(records[1].author, None);
    assert_eq!(records[1].date, None);
    assert_eq!(fake.seen.lock().unwrap().auth, None);
}

#[tokio::test]
async fn read_commits_feeds_the_normalizer() {
    let (base, _) = start_fake(StatusCode::OK, sample_commits()).await;

    let payload = source(base, None).read_commits().await.unwrap();
    let entries = clean_commit_messages(&payload);

    assert_eq!(
        entries,
        vec![
            "Author: Ada Lovelace\nDate: 2024-03-01T10:00:00Z\nMessage:\nAdd CSV export ()".to_string(),
            "Author: Unknown author\nDate: Unknown date\nMessage:\nFix crash on save".to_string(),
        ]
    );
}

#[tokio::test]
async fn error_status_is_reported_with_body() {
    let body = r#"{"message":"Not Found"}"#.to_string();
    let (base, _) = start_fake(StatusCode::NOT_FOUND, body.clone()).await;

    let err = source(base, None).fetch_commits().await.unwrap_err();

    assert_eq!(err, SourceError::Status { status: 404, body });
}

#[tokio::test]
async fn unexpected_shape_is_invalid_response() {
    let (base, _) = start_fake(StatusCode::OK, r#"{"message":"oops"}"#.to_string()).await;

    let err = source(base, None).read_commits().await.unwrap_err();

    assert!(matches!(err, SourceError::InvalidResponse { .. }), "got {err:?}");
}
