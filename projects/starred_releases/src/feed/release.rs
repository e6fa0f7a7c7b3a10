use chrono::{DateTime, Utc};
use interfaces_github_releases::index::RepositoryRelease;

/// A repository the subject user has starred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarredRepository {
    pub owner: String,
    pub name: String,
}

impl StarredRepository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl From<interfaces_github_starred::index::StarredRepository> for StarredRepository {
    fn from(repository: interfaces_github_starred::index::StarredRepository) -> Self {
        Self {
            owner: repository.owner.login,
            name: repository.name,
        }
    }
}

/// A GitHub release together with the repository it was published in.
#[derive(Debug, Clone)]
pub struct Release {
    pub owner: String,
    pub repository: String,
    pub release: RepositoryRelease,
}

impl Release {
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        release: RepositoryRelease,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            release,
        }
    }

    pub fn id(&self) -> u64 {
        self.release.id
    }

    /// Drafts have no publication time yet, so they sort by creation time.
    pub fn published_at(&self) -> DateTime<Utc> {
        self.release.published_at.unwrap_or(self.release.created_at)
    }

    /// Unnamed releases are shown under their tag.
    pub fn display_name(&self) -> &str {
        self.release
            .name
            .as_deref()
            .unwrap_or(&self.release.tag_name)
    }

    pub fn title(&self) -> String {
        format!(
            "[{}/{}] {} ({})",
            self.owner,
            self.repository,
            self.display_name(),
            self.release.tag_name
        )
    }

    /// The first asset's uploader when more than one asset is attached,
    /// otherwise the repository owner.
    pub fn releaser(&self) -> &str {
        if self.release.assets.len() > 1 {
            if let Some(uploader) = &self.release.assets[0].uploader {
                return &uploader.login;
            }
        }

        &self.owner
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::feed::fixtures::{asset, repository_release};

    #[test]
    fn title_uses_owner_repository_name_and_tag() {
        let release = Release::new("x", "y", repository_release(42, "v1", "v1.0"));

        assert_eq!(release.title(), "[x/y] v1 (v1.0)");
    }

    #[test]
    fn unnamed_release_is_titled_by_tag() {
        let mut provider = repository_release(7, "ignored", "v2.0.0");
        provider.name = None;

        let release = Release::new("x", "y", provider);

        assert_eq!(release.display_name(), "v2.0.0");
        assert_eq!(release.title(), "[x/y] v2.0.0 (v2.0.0)");
    }

    #[test]
    fn draft_falls_back_to_creation_time() {
        let mut provider = repository_release(7, "v2", "v2");
        provider.published_at = None;
        provider.created_at = Utc.with_ymd_and_hms(2020, 2, 2, 0, 0, 0).unwrap();

        let release = Release::new("x", "y", provider);

        assert_eq!(
            release.published_at(),
            Utc.with_ymd_and_hms(2020, 2, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn releaser_is_owner_without_assets() {
        let release = Release::new("x", "y", repository_release(1, "v1", "v1"));

        assert_eq!(release.releaser(), "x");
    }

    #[test]
    fn releaser_is_owner_with_single_asset() {
        let mut provider = repository_release(1, "v1", "v1");
        provider.assets = vec![asset(Some("uploader"))];

        let release = Release::new("x", "y", provider);

        assert_eq!(release.releaser(), "x");
    }

    #[test]
    fn releaser_is_first_uploader_with_several_assets() {
        let mut provider = repository_release(1, "v1", "v1");
        provider.assets = vec![asset(Some("first")), asset(Some("second"))];

        let release = Release::new("x", "y", provider);

        assert_eq!(release.releaser(), "first");
    }

    #[test]
    fn releaser_is_owner_when_first_uploader_is_unknown() {
        let mut provider = repository_release(1, "v1", "v1");
        provider.assets = vec![asset(None), asset(Some("second"))];

        let release = Release::new("x", "y", provider);

        assert_eq!(release.releaser(), "x");
    }

    #[test]
    fn converts_api_repository() {
        let api = interfaces_github_starred::index::StarredRepository {
            name: "y".to_string(),
            owner: interfaces_github_starred::index::RepositoryOwner {
                login: "x".to_string(),
            },
        };

        let repository = StarredRepository::from(api);

        assert_eq!(repository.full_name(), "x/y");
    }
}
