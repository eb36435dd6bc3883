//! Wiki page records.

use serde::{Deserialize, Serialize};

use crate::inject::{Inject, Injected};

/// Wiki page.
///
/// `etag` is not part of the JSON body: it comes from the `ETag` response
/// header of the request that produced this page. Pass it back as the
/// `etag` argument of the next update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPage {
    /// Page ID.
    #[serde(default)]
    pub id: Option<u32>,
    /// Page path (e.g. `/Home/Getting Started`).
    pub path: String,
    /// Position among siblings.
    #[serde(default)]
    pub order: Option<u32>,
    /// Path of the backing file in the wiki repository.
    #[serde(default)]
    pub git_item_path: Option<String>,
    /// Sub-pages, filled according to the requested recursion level.
    #[serde(default)]
    pub sub_pages: Vec<WikiPage>,
    /// REST URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Web UI URL.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Markdown content, present when requested.
    #[serde(default)]
    pub content: Option<String>,
    /// Page has sub-pages.
    #[serde(default)]
    pub is_parent_page: bool,
    /// Backing file does not follow wiki naming rules.
    #[serde(default)]
    pub is_non_conformant: bool,
    /// Concurrency token from the response header.
    #[serde(skip)]
    pub etag: Option<String>,
}

impl Inject for WikiPage {
    fn inject(&mut self, injected: Injected) {
        self.etag = injected.into_etag();
    }
}

/// Page with view statistics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPageDetail {
    /// Page ID.
    pub id: u32,
    /// Page path.
    pub path: String,
    /// Daily view counts.
    #[serde(default)]
    pub view_stats: Vec<WikiPageStat>,
}

impl Inject for WikiPageDetail {}

/// Views of a page on one day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WikiPageStat {
    /// Day as reported by the server (ISO 8601).
    pub day: String,
    /// Number of views.
    pub count: u32,
}

/// Request body of a page move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPageMoveParameters {
    /// Current page path.
    pub path: String,
    /// Destination path.
    pub new_path: String,
    /// Position among the new siblings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_order: Option<u32>,
}

/// Completed page move.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiPageMove {
    /// Previous page path.
    pub path: String,
    /// New page path.
    pub new_path: String,
    #[serde(default)]
    pub new_order: Option<u32>,
    /// Page after the move.
    #[serde(default)]
    pub page: Option<WikiPage>,
    /// Concurrency token from the response header.
    #[serde(skip)]
    pub etag: Option<String>,
}

impl Inject for WikiPageMove {
    fn inject(&mut self, injected: Injected) {
        self.etag = injected.into_etag();
    }
}
