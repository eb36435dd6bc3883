//! Git version descriptors and the enums carried in wiki query strings.
//!
//! Query strings use the declared variant name in upper case
//! (`versionType=BRANCH`), while JSON bodies use camelCase (`"branch"`).
//! The two forms are kept separate on purpose; see [`GitVersionType::query_name`].

use serde::Deserialize;

/// How the `version` identifier of a [`VersionDescriptor`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GitVersionType {
    /// Branch name.
    #[default]
    Branch,
    /// Tag name.
    Tag,
    /// Commit SHA.
    Commit,
}

impl GitVersionType {
    /// Name sent in the `versionType` query parameter.
    #[must_use]
    pub fn query_name(self) -> &'static str {
        match self {
            Self::Branch => "BRANCH",
            Self::Tag => "TAG",
            Self::Commit => "COMMIT",
        }
    }
}

/// Modifier applied to the resolved version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GitVersionOptions {
    /// Use the version as is.
    #[default]
    None,
    /// Commit before the resolved one.
    PreviousChange,
    /// First parent of the resolved commit.
    FirstParent,
}

impl GitVersionOptions {
    /// Name sent in the `versionOptions` query parameter.
    #[must_use]
    pub fn query_name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::PreviousChange => "PREVIOUSCHANGE",
            Self::FirstParent => "FIRSTPARENT",
        }
    }
}

/// How many levels of sub-pages a page query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionControlRecursionType {
    /// Only the named page.
    #[default]
    None,
    /// The page and its direct children.
    OneLevel,
    /// Direct children plus nested folders without pages.
    OneLevelPlusNestedEmptyFolders,
    /// The whole subtree.
    Full,
}

impl VersionControlRecursionType {
    /// Name sent in the `recursionLevel` query parameter.
    #[must_use]
    pub fn query_name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::OneLevel => "ONELEVEL",
            Self::OneLevelPlusNestedEmptyFolders => "ONELEVELPLUSNESTEDEMPTYFOLDERS",
            Self::Full => "FULL",
        }
    }
}

/// Source-control point a wiki operation applies to.
///
/// Passed per request and never stored by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
    /// Branch or tag name, or commit SHA.
    pub version: String,
    /// How `version` is interpreted.
    #[serde(default)]
    pub version_type: GitVersionType,
    /// Modifier applied to the resolved version.
    #[serde(default)]
    pub version_options: GitVersionOptions,
}

impl VersionDescriptor {
    /// Descriptor pointing at the tip of a branch.
    #[must_use]
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            version: name.into(),
            version_type: GitVersionType::Branch,
            version_options: GitVersionOptions::None,
        }
    }

    /// Descriptor pointing at a tag.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            version: name.into(),
            version_type: GitVersionType::Tag,
            version_options: GitVersionOptions::None,
        }
    }

    /// Descriptor pointing at a commit SHA.
    #[must_use]
    pub fn commit(sha: impl Into<String>) -> Self {
        Self {
            version: sha.into(),
            version_type: GitVersionType::Commit,
            version_options: GitVersionOptions::None,
        }
    }

    /// Apply a version modifier such as [`GitVersionOptions::PreviousChange`].
    #[must_use]
    pub fn with_options(mut self, options: GitVersionOptions) -> Self {
        self.version_options = options;
        self
    }
}
