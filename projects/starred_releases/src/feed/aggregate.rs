use std::sync::Arc;

use interfaces_github_releases::index::{FetchRepositoryReleasesPageError, RepositoryRelease};
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use super::pagination::{fetch_all, PAGE_SIZE};
use super::release::{Release, StarredRepository};
use crate::github::GitHubApi;

#[derive(Debug, Error)]
pub enum RepositoryReleasesError {
    #[error("{repository}: {source}")]
    FetchReleases {
        repository: String,
        source: FetchRepositoryReleasesPageError,
    },

    #[error("TaskJoin: {source}")]
    TaskJoin {
        source: JoinError,
    },
}

#[derive(Debug, Error)]
pub enum AggregateReleasesError {
    #[error("encountered the following errors: [{}]", join_failures(.failures))]
    RepositoryFailures {
        failures: Vec<RepositoryReleasesError>,
    },
}

fn join_failures(failures: &[RepositoryReleasesError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every release of one repository, walking all pages.
pub async fn fetch_repository_releases<A>(
    client: &A,
    owner: &str,
    name: &str,
) -> Result<Vec<RepositoryRelease>, FetchRepositoryReleasesPageError>
where
    A: GitHubApi + ?Sized,
{
    fetch_all(PAGE_SIZE, |page| client.list_releases(owner, name, page, PAGE_SIZE)).await
}

/// Fetches the releases of every repository concurrently, one task each.
///
/// All tasks are awaited before anything is returned. If any of them failed
/// the combined error lists every failure and the releases that were fetched
/// successfully are discarded.
pub async fn aggregate_releases<A>(
    client: Arc<A>,
    repositories: Vec<StarredRepository>,
) -> Result<Vec<Release>, AggregateReleasesError>
where
    A: GitHubApi + 'static,
{
    let mut tasks = JoinSet::new();

    for repository in repositories {
        let client = Arc::clone(&client);

        tasks.spawn(async move {
            let result =
                fetch_repository_releases(client.as_ref(), &repository.owner, &repository.name)
                    .await;

            let full_name = repository.full_name();
            match &result {
                Ok(found) => {
                    debug!(repository = %full_name, releases = found.len(), "fetched releases")
                }
                Err(err) => {
                    debug!(repository = %full_name, error = %err, "failed to fetch releases")
                }
            }

            (repository, result)
        });
    }

    let mut releases = Vec::new();
    let mut failures = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((repository, Ok(found))) => {
                releases.extend(found.into_iter().map(|release| {
                    Release::new(repository.owner.clone(), repository.name.clone(), release)
                }));
            }
            Ok((repository, Err(source))) => {
                failures.push(RepositoryReleasesError::FetchReleases {
                    repository: repository.full_name(),
                    source,
                });
            }
            Err(source) => failures.push(RepositoryReleasesError::TaskJoin { source }),
        }
    }

    if !failures.is_empty() {
        warn!(failures = failures.len(), "release aggregation failed");
        return Err(AggregateReleasesError::RepositoryFailures { failures });
    }

    info!(releases = releases.len(), "aggregated releases");

    Ok(releases)
}
