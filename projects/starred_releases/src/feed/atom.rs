use std::string::FromUtf8Error;

use atom_syndication::{Content, Entry, Feed, Link, Person, Text};
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::release::Release;
use super::sanitize::render_body;

#[derive(Debug, Error)]
pub enum RenderFeedError {
    #[error("WriteFeed: {source}")]
    WriteFeed {
        source: atom_syndication::Error,
    },

    #[error("DecodeFeed: {source}")]
    DecodeFeed {
        source: FromUtf8Error,
    },
}

/// Projects `releases` into a feed, newest first.
///
/// Releases published at the same instant are ordered by release id, then
/// by owner and repository, so equal inputs always give equal output.
pub fn feed_document(
    feed_id: &str,
    user: &str,
    mut releases: Vec<Release>,
    updated: DateTime<Utc>,
) -> Feed {
    releases.sort_by(|a, b| {
        b.published_at()
            .cmp(&a.published_at())
            .then_with(|| a.id().cmp(&b.id()))
            .then_with(|| a.owner.cmp(&b.owner))
            .then_with(|| a.repository.cmp(&b.repository))
    });

    let entries: Vec<Entry> = releases
        .iter()
        .map(|release| feed_entry(feed_id, release))
        .collect();

    let mut feed = Feed::default();
    feed.set_id(feed_id);
    feed.set_title(format!("Starred Github Releases for {user}"));
    feed.set_updated(updated.fixed_offset());
    feed.set_links(vec![link("self", feed_id)]);
    feed.set_entries(entries);
    feed
}

pub fn feed_entry(feed_id: &str, release: &Release) -> Entry {
    let published = release.published_at().fixed_offset();

    let mut author = Person::default();
    author.set_name(release.releaser());

    let mut content = Content::default();
    content.set_content_type(Some("html".to_string()));
    content.set_value(Some(render_body(release.release.body.as_deref())));

    let mut entry = Entry::default();
    entry.set_id(format!("{feed_id}/{}", release.id()));
    entry.set_title(release.title());
    entry.set_updated(published);
    entry.set_published(Some(published));
    entry.set_authors(vec![author]);
    entry.set_links(vec![link("alternate", &release.release.html_url)]);
    entry.set_content(Some(content));
    entry
}

fn link(rel: &str, href: &str) -> Link {
    let mut link = Link::default();
    link.set_rel(rel);
    link.set_href(href);
    link
}

pub fn write_feed(feed: &Feed) -> Result<String, RenderFeedError> {
    let buffer = feed
        .write_to(Vec::new())
        .map_err(|source| RenderFeedError::WriteFeed { source })?;

    String::from_utf8(buffer).map_err(|source| RenderFeedError::DecodeFeed { source })
}

/// Serializes the feed of `releases`, stamped with the current time.
pub fn render_feed(
    feed_id: &str,
    user: &str,
    releases: Vec<Release>,
) -> Result<String, RenderFeedError> {
    write_feed(&feed_document(feed_id, user, releases, Utc::now()))
}
