//! Wiki records.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::version::VersionDescriptor;
use crate::inject::Inject;

/// Kind of wiki.
///
/// Responses carry camelCase names (`codeWiki`); request bodies send the
/// lowercase form returned by [`WikiType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WikiType {
    /// Wiki provisioned by the project, backed by a hidden repository.
    #[serde(alias = "projectwiki")]
    ProjectWiki,
    /// Wiki published from a folder of a git repository.
    #[serde(alias = "codewiki")]
    CodeWiki,
}

impl WikiType {
    /// Lowercase name sent in request bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectWiki => "projectwiki",
            Self::CodeWiki => "codewiki",
        }
    }
}

/// Wiki.
///
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiV2 {
    /// Wiki ID.
    pub id: String,
    /// Wiki name.
    pub name: String,
    /// Wiki type.
    #[serde(rename = "type")]
    pub wiki_type: WikiType,
    /// Project the wiki belongs to.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Backing git repository.
    #[serde(default)]
    pub repository_id: Option<String>,
    /// Folder of the repository published as the wiki.
    #[serde(default)]
    pub mapped_path: Option<String>,
    /// REST URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Web UI URL.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Published versions of a code wiki.
    #[serde(default)]
    pub versions: Vec<VersionDescriptor>,
    /// Extra wiki properties set by the service.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Wiki is disabled and cannot be edited.
    #[serde(default)]
    pub is_disabled: bool,
}

impl Inject for WikiV2 {}

/// Wikis API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WikiV2Collection {
    /// Number of wikis reported by the server.
    pub count: usize,
    /// Wikis in server order.
    #[serde(default)]
    pub value: Vec<WikiV2>,
}

impl Inject for WikiV2Collection {}

/// Parameters for creating a wiki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiCreateParameters {
    /// Wiki name.
    pub name: String,
    /// Wiki type.
    pub wiki_type: WikiType,
    /// Project in which the wiki is created.
    pub project_id: String,
    /// Backing repository. Not used for project wikis.
    pub repository_id: Option<String>,
    /// Folder inside the repository to publish. Not used for project wikis.
    pub mapped_path: Option<String>,
    /// Branch to publish. Not used for project wikis.
    pub branch: Option<String>,
}

impl WikiCreateParameters {
    /// Parameters for a project wiki.
    #[must_use]
    pub fn project_wiki(name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wiki_type: WikiType::ProjectWiki,
            project_id: project_id.into(),
            repository_id: None,
            mapped_path: None,
            branch: None,
        }
    }

    /// Parameters for a code wiki published from `mapped_path` on `branch`.
    #[must_use]
    pub fn code_wiki(
        name: impl Into<String>,
        project_id: impl Into<String>,
        repository_id: impl Into<String>,
        mapped_path: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            wiki_type: WikiType::CodeWiki,
            project_id: project_id.into(),
            repository_id: Some(repository_id.into()),
            mapped_path: Some(mapped_path.into()),
            branch: Some(branch.into()),
        }
    }
}
