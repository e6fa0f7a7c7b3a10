use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// A release as GitHub describes it, without any repository context.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRelease {
    pub id: u64,
    pub name: Option<String>,
    pub tag_name: String,
    pub body: Option<String>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    /// Null for drafts.
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub uploader: Option<AssetUploader>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetUploader {
    pub login: String,
}

/// Fetches one page of the releases published in `owner/repo`.
///
/// `page` is the API's one-based page number.
pub async fn fetch_repository_releases_page(
    client: &Client,
    api_base_url: &str,
    token: &str,
    owner: &str,
    repo: &str,
    page: u32,
    per_page: u32,
) -> Result<Vec<RepositoryRelease>, FetchRepositoryReleasesPageError> {
    let url = endpoint_url(api_base_url, ["repos", owner, repo, "releases"])?;

    debug!(%url, page, per_page, "fetching releases page");

    let response = client
        .get(url)
        .query(&[("page", page), ("per_page", per_page)])
        .bearer_auth(token)
        .header(header::ACCEPT, "application/vnd.github+json")
        .send()
        .await
        .map_err(|source| FetchRepositoryReleasesPageError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchRepositoryReleasesPageError::ResponseRead { source })?;

    if !status.is_success() {
        return Err(FetchRepositoryReleasesPageError::UnexpectedStatus { status, body });
    }

    serde_json::from_str(&body)
        .map_err(|source| FetchRepositoryReleasesPageError::DeserializeResponseBody { source })
}

/// Appends `segments` to the base URL, percent-encoding each one so that no
/// segment can add path components or a query of its own.
fn endpoint_url<const N: usize>(
    api_base_url: &str,
    segments: [&str; N],
) -> Result<Url, FetchRepositoryReleasesPageError> {
    let mut url = Url::parse(api_base_url)
        .map_err(|source| FetchRepositoryReleasesPageError::ParseBaseUrl { source })?;

    url.path_segments_mut()
        .map_err(|()| FetchRepositoryReleasesPageError::InvalidBaseUrl {
            url: api_base_url.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

#[derive(Debug, Error)]
pub enum FetchRepositoryReleasesPageError {
    #[error("ParseBaseUrl: {source}")]
    ParseBaseUrl {
        source: url::ParseError,
    },

    #[error("InvalidBaseUrl: {url} cannot take path segments")]
    InvalidBaseUrl {
        url: String,
    },

    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("UnexpectedStatus: {status}: {body}")]
    UnexpectedStatus {
        status: StatusCode,
        body: String,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        source: serde_json::Error,
    },
}
