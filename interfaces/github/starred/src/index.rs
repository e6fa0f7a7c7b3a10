use reqwest::{header, Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct StarredRepository {
    pub name: String,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// Fetches one page of the repositories `user` has starred.
///
/// `page` is the API's one-based page number.
pub async fn fetch_user_starred_page(
    client: &Client,
    api_base_url: &str,
    token: &str,
    user: &str,
    page: u32,
    per_page: u32,
) -> Result<Vec<StarredRepository>, FetchUserStarredPageError> {
    let url = endpoint_url(api_base_url, ["users", user, "starred"])?;

    debug!(%url, page, per_page, "fetching starred repositories page");

    let response = client
        .get(url)
        .query(&[("page", page), ("per_page", per_page)])
        .bearer_auth(token)
        .header(header::ACCEPT, "application/vnd.github+json")
        .send()
        .await
        .map_err(|source| FetchUserStarredPageError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchUserStarredPageError::ResponseRead { source })?;

    if !status.is_success() {
        return Err(FetchUserStarredPageError::UnexpectedStatus { status, body });
    }

    serde_json::from_str(&body)
        .map_err(|source| FetchUserStarredPageError::DeserializeResponseBody { source })
}

/// Appends `segments` to the base URL, percent-encoding each one so that no
/// segment can add path components or a query of its own.
fn endpoint_url<const N: usize>(
    api_base_url: &str,
    segments: [&str; N],
) -> Result<Url, FetchUserStarredPageError> {
    let mut url = Url::parse(api_base_url)
        .map_err(|source| FetchUserStarredPageError::ParseBaseUrl { source })?;

    url.path_segments_mut()
        .map_err(|()| FetchUserStarredPageError::InvalidBaseUrl {
            url: api_base_url.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

#[derive(Debug, Error)]
pub enum FetchUserStarredPageError {
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
