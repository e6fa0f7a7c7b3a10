//! Seam between the feed pipeline and the GitHub REST API.

use std::time::Duration;

use async_trait::async_trait;
use interfaces_github_releases::index::{
    fetch_repository_releases_page, FetchRepositoryReleasesPageError, RepositoryRelease,
};
use interfaces_github_starred::index::{
    fetch_user_starred_page, FetchUserStarredPageError, StarredRepository,
};
use reqwest::Client;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("starred-releases/", env!("CARGO_PKG_VERSION"));

/// Listing calls used by the feed pipeline. Page indices are zero-based.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn list_starred(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StarredRepository>, FetchUserStarredPageError>;

    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryRelease>, FetchRepositoryReleasesPageError>;
}

/// Authenticated client for one feed build. The token is opaque to us.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(http: Client, api_base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_starred(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StarredRepository>, FetchUserStarredPageError> {
        fetch_user_starred_page(
            &self.http,
            &self.api_base_url,
            &self.token,
            user,
            page + 1,
            per_page,
        )
        .await
    }

    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryRelease>, FetchRepositoryReleasesPageError> {
        fetch_repository_releases_page(
            &self.http,
            &self.api_base_url,
            &self.token,
            owner,
            repo,
            page + 1,
            per_page,
        )
        .await
    }
}

/// Shared transport for all feed builds. Without `timeout` the transport defaults apply.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(USER_AGENT);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}
