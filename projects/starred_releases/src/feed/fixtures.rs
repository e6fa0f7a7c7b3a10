use chrono::{DateTime, TimeZone, Utc};
use interfaces_github_releases::index::{AssetUploader, ReleaseAsset, RepositoryRelease};

use super::release::Release;

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn repository_release(id: u64, name: &str, tag: &str) -> RepositoryRelease {
    RepositoryRelease {
        id,
        name: Some(name.to_string()),
        tag_name: tag.to_string(),
        body: None,
        html_url: format!("https://github.com/releases/{id}"),
        created_at: at(2022, 1, 1),
        published_at: Some(at(2022, 1, 1)),
        assets: Vec::new(),
    }
}

pub fn asset(uploader: Option<&str>) -> ReleaseAsset {
    ReleaseAsset {
        name: "artifact.tar.gz".to_string(),
        uploader: uploader.map(|login| AssetUploader {
            login: login.to_string(),
        }),
    }
}

pub fn release_at(
    owner: &str,
    repository: &str,
    id: u64,
    published_at: DateTime<Utc>,
) -> Release {
    let mut provider = repository_release(id, &format!("release {id}"), &format!("v{id}"));
    provider.published_at = Some(published_at);

    Release::new(owner, repository, provider)
}
