use std::sync::Arc;

use atom_syndication::Feed;
use chrono::Utc;
use interfaces_github_starred::index::FetchUserStarredPageError;
use thiserror::Error;
use tracing::info;

use super::aggregate::{aggregate_releases, AggregateReleasesError};
use super::atom::{feed_document, write_feed, RenderFeedError};
use super::pagination::{fetch_all, PAGE_SIZE};
use super::release::StarredRepository;
use crate::github::GitHubApi;

#[derive(Debug, Error)]
pub enum BuildFeedError {
    #[error("FetchStarredRepositories: {source}")]
    FetchStarredRepositories {
        #[from]
        source: FetchUserStarredPageError,
    },

    #[error("AggregateReleases: {source}")]
    AggregateReleases {
        #[from]
        source: AggregateReleasesError,
    },

    #[error("RenderFeed: {source}")]
    RenderFeed {
        #[from]
        source: RenderFeedError,
    },
}

pub async fn fetch_starred_repositories<A>(
    client: &A,
    user: &str,
) -> Result<Vec<StarredRepository>, FetchUserStarredPageError>
where
    A: GitHubApi + ?Sized,
{
    let repositories =
        fetch_all(PAGE_SIZE, |page| client.list_starred(user, page, PAGE_SIZE)).await?;

    Ok(repositories.into_iter().map(StarredRepository::from).collect())
}

/// Fetches everything `user` has starred and assembles the feed document.
pub async fn build_feed_document<A>(
    client: Arc<A>,
    feed_id: &str,
    user: &str,
) -> Result<Feed, BuildFeedError>
where
    A: GitHubApi + 'static,
{
    let repositories = fetch_starred_repositories(client.as_ref(), user).await?;
    info!(user, repositories = repositories.len(), "fetched starred repositories");

    let releases = aggregate_releases(client, repositories).await?;

    Ok(feed_document(feed_id, user, releases, Utc::now()))
}

/// Builds the serialized Atom feed of releases from `user`'s starred repositories.
pub async fn build_feed<A>(
    client: Arc<A>,
    feed_id: &str,
    user: &str,
) -> Result<String, BuildFeedError>
where
    A: GitHubApi + 'static,
{
    let document = build_feed_document(client, feed_id, user).await?;

    Ok(write_feed(&document)?)
}
