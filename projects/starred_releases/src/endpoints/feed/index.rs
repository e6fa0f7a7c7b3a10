use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::app::AppState;
use crate::feed::{build_feed, BuildFeedError};
use crate::github::GitHubClient;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("MissingUser: no user in the path and none configured")]
    MissingUser,

    #[error("MissingAccessToken: no access_token parameter and none configured")]
    MissingAccessToken,

    #[error("InvalidUser: {user:?} is not a GitHub login")]
    InvalidUser { user: String },

    #[error("BuildFeed: {source}")]
    BuildFeed {
        #[from]
        source: BuildFeedError,
    },
}

/// Failures never carry a body; the detail only goes to the log.
impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match &self {
            HandlerError::MissingUser
            | HandlerError::MissingAccessToken
            | HandlerError::InvalidUser { .. } => {
                warn!(error = %self, "rejected feed request");
                StatusCode::BAD_REQUEST.into_response()
            }
            HandlerError::BuildFeed { .. } => {
                error!(error = %self, "failed to build feed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Query parameters for the feed endpoints.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    access_token: Option<String>,
}

/// Axum handler: GET /feed
pub async fn configured_user_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<FeedQuery>,
) -> Result<Response, HandlerError> {
    let user = state.user.clone().ok_or(HandlerError::MissingUser)?;

    serve_feed(&state, &uri, &headers, query, &user).await
}

/// Axum handler: GET /feed/{user}
pub async fn user_handler(
    State(state): State<AppState>,
    Path(user): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<FeedQuery>,
) -> Result<Response, HandlerError> {
    if !is_github_login(&user) {
        return Err(HandlerError::InvalidUser { user });
    }

    serve_feed(&state, &uri, &headers, query, &user).await
}

/// GitHub logins are 1 to 39 ASCII letters, digits or hyphens.
fn is_github_login(user: &str) -> bool {
    (1..=39).contains(&user.len())
        && user.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
}

async fn serve_feed(
    state: &AppState,
    uri: &Uri,
    headers: &HeaderMap,
    query: FeedQuery,
    user: &str,
) -> Result<Response, HandlerError> {
    let token = query
        .access_token
        .filter(|token| !token.is_empty())
        .or_else(|| state.access_token.clone())
        .ok_or(HandlerError::MissingAccessToken)?;

    let feed_id = feed_id(state.public_url.as_deref(), headers, uri.path());

    let client = Arc::new(GitHubClient::new(
        state.http.clone(),
        state.api_base_url.clone(),
        token,
    ));

    let feed = build_feed(client, &feed_id, user).await?;

    info!(user, %feed_id, bytes = feed.len(), "served feed");

    Ok(([(header::CONTENT_TYPE, "application/xml")], feed).into_response())
}

/// The feed's own URL, which doubles as its Atom identifier.
fn feed_id(public_url: Option<&str>, headers: &HeaderMap, path: &str) -> String {
    match public_url {
        Some(base) => format!("{}{path}", base.trim_end_matches('/')),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("localhost");

            format!("http://{host}{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Bytes};
    use axum::http::HeaderValue;
    use interfaces_github_starred::index::FetchUserStarredPageError;

    use super::*;

    #[test]
    fn feed_id_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("feeds.local:8080"));

        assert_eq!(
            feed_id(None, &headers, "/feed"),
            "http://feeds.local:8080/feed"
        );
    }

    #[test]
    fn feed_id_prefers_public_url() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:8080"));

        assert_eq!(
            feed_id(Some("https://feeds.example.com/"), &headers, "/feed/alice"),
            "https://feeds.example.com/feed/alice"
        );
    }

    #[test]
    fn feed_id_without_host_falls_back_to_localhost() {
        assert_eq!(
            feed_id(None, &HeaderMap::new(), "/feed"),
            "http://localhost/feed"
        );
    }

    #[test]
    fn github_logins() {
        assert!(is_github_login("alice"));
        assert!(is_github_login("tokio-rs"));
        assert!(is_github_login("a1"));
        assert!(is_github_login(&"a".repeat(39)));

        assert!(!is_github_login(""));
        assert!(!is_github_login(&"a".repeat(40)));
        assert!(!is_github_login("../user/repos?x="));
        assert!(!is_github_login("a/b"));
        assert!(!is_github_login("a b"));
        assert!(!is_github_login("a%2Fb"));
        assert!(!is_github_login("ålice"));
    }

    async fn status_and_body(err: HandlerError) -> (StatusCode, Bytes) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, body)
    }

    #[tokio::test]
    async fn errors_map_to_bodyless_statuses() {
        let cases = [
            (HandlerError::MissingUser, StatusCode::BAD_REQUEST),
            (HandlerError::MissingAccessToken, StatusCode::BAD_REQUEST),
            (
                HandlerError::InvalidUser {
                    user: "a/b".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                HandlerError::BuildFeed {
                    source: BuildFeedError::FetchStarredRepositories {
                        source: FetchUserStarredPageError::UnexpectedStatus {
                            status: StatusCode::UNAUTHORIZED,
                            body: "Bad credentials".to_string(),
                        },
                    },
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let (status, body) = status_and_body(err).await;

            assert_eq!(status, expected);
            assert!(body.is_empty(), "{body:?}");
        }
    }
}
