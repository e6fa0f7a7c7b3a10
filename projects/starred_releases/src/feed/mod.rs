//! Starred repositories → releases → Atom feed.

pub mod aggregate;
pub mod atom;
pub mod build;
pub mod pagination;
pub mod release;
pub mod sanitize;

#[cfg(test)]
mod fixtures;

pub use aggregate::{aggregate_releases, AggregateReleasesError, RepositoryReleasesError};
pub use atom::{feed_document, feed_entry, render_feed, write_feed, RenderFeedError};
pub use build::{build_feed, build_feed_document, fetch_starred_repositories, BuildFeedError};
pub use pagination::{fetch_all, PAGE_SIZE};
pub use release::{Release, StarredRepository};
pub use sanitize::render_body;
