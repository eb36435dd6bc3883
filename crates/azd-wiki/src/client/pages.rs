//! Page operations.
//!
//! Metadata operations return a [`WikiPage`] whose `etag` comes from the
//! response header. Content operations return the page document itself.

use serde_json::json;
use tracing::info;
use ureq::BodyReader;

use super::WikiClient;
use crate::error::WikiError;
use crate::params::QueryParams;
use crate::request::{
    API_VERSION_PAGES, CONTENT_TYPE_TEXT, CONTENT_TYPE_ZIP, HttpMethod, RequestSpec,
};
use crate::types::{VersionControlRecursionType, VersionDescriptor, WikiPage, WikiPageDetail};

/// Options for reading page metadata.
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    /// Include the markdown content in the response.
    pub include_content: bool,
    /// Sub-page levels to include. Server default is the page alone.
    pub recursion_level: Option<VersionControlRecursionType>,
    /// Version of a code wiki to read. Defaults to the published branch.
    pub version: Option<VersionDescriptor>,
}

impl PageQuery {
    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if self.include_content {
            query.insert("includeContent", "true");
        }
        query
            .recursion_level(self.recursion_level)
            .version(self.version.as_ref());
        query
    }
}

/// Options for creating, editing or deleting a page.
#[derive(Debug, Clone, Default)]
pub struct PageWriteOptions {
    /// Commit comment.
    pub comment: Option<String>,
    /// Version of a code wiki to write to.
    pub version: Option<VersionDescriptor>,
}

impl PageWriteOptions {
    /// Options with only a commit comment.
    #[must_use]
    pub fn with_comment(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            version: None,
        }
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .comment(self.comment.as_deref())
            .version(self.version.as_ref());
        query
    }
}

impl WikiClient {
    /// Get page metadata by path.
    pub fn get_page(&self, wiki: &str, path: &str, options: &PageQuery) -> Result<WikiPage, WikiError> {
        let mut query = options.to_query();
        query.insert("path", path);

        info!("Getting page {} in wiki {}", path, wiki);

        self.execute(pages_request("get_page", HttpMethod::Get, wiki).query(query))
    }

    /// Get page metadata by page ID.
    pub fn get_page_by_id(&self, wiki: &str, id: u32, options: &PageQuery) -> Result<WikiPage, WikiError> {
        info!("Getting page {} in wiki {}", id, wiki);

        self.execute(
            pages_request("get_page_by_id", HttpMethod::Get, wiki)
                .segment(id.to_string())
                .query(options.to_query()),
        )
    }

    /// Get view statistics of a page.
    pub fn get_page_stats(&self, wiki: &str, id: u32) -> Result<WikiPageDetail, WikiError> {
        info!("Getting stats for page {} in wiki {}", id, wiki);

        self.execute(
            pages_request("get_page_stats", HttpMethod::Get, wiki)
                .segment(id.to_string())
                .segment("stats"),
        )
    }

    /// Get the markdown content of a page, exactly as stored.
    pub fn get_page_text(&self, wiki: &str, id: u32) -> Result<String, WikiError> {
        info!("Getting content of page {} in wiki {}", id, wiki);

        let request = pages_request("get_page_text", HttpMethod::Get, wiki)
            .segment(id.to_string())
            .header("Accept", CONTENT_TYPE_TEXT);
        self.dispatch(request)?.text()
    }

    /// Stream a page and its sub-pages as a zip archive.
    pub fn get_page_archive(&self, wiki: &str, id: u32) -> Result<BodyReader<'static>, WikiError> {
        info!("Downloading page {} in wiki {} as zip", id, wiki);

        let request = pages_request("get_page_archive", HttpMethod::Get, wiki)
            .segment(id.to_string())
            .header("Accept", CONTENT_TYPE_ZIP);
        Ok(self.dispatch(request)?.into_reader())
    }

    /// Create a page, or replace its content when `etag` is given.
    ///
    /// `etag` must be the token of the page revision being replaced; the
    /// server rejects stale tokens with a non-success status.
    pub fn create_or_update_page(
        &self,
        wiki: &str,
        path: &str,
        content: &str,
        etag: Option<&str>,
        options: &PageWriteOptions,
    ) -> Result<WikiPage, WikiError> {
        let mut query = options.to_query();
        query.insert("path", path);

        if etag.is_some() {
            info!("Updating page {} in wiki {}", path, wiki);
        } else {
            info!("Creating page {} in wiki {}", path, wiki);
        }

        let mut request = pages_request("create_or_update_page", HttpMethod::Put, wiki)
            .query(query)
            .json_body(&json!({ "content": content }))?;
        if let Some(etag) = etag {
            request = request.header("If-Match", etag);
        }

        let page: WikiPage = self.execute(request)?;
        info!("Saved page {} (id={:?})", page.path, page.id);
        Ok(page)
    }

    /// Replace the content of a page by ID.
    pub fn update_page(
        &self,
        wiki: &str,
        id: u32,
        content: &str,
        etag: &str,
        comment: Option<&str>,
    ) -> Result<WikiPage, WikiError> {
        let mut query = QueryParams::new();
        query.comment(comment);

        info!("Updating page {} in wiki {}", id, wiki);

        let request = pages_request("update_page", HttpMethod::Patch, wiki)
            .segment(id.to_string())
            .query(query)
            .json_body(&json!({ "content": content }))?
            .header("If-Match", etag);

        self.execute(request)
    }

    /// Delete a page by path.
    pub fn delete_page(
        &self,
        wiki: &str,
        path: &str,
        options: &PageWriteOptions,
    ) -> Result<WikiPage, WikiError> {
        let mut query = options.to_query();
        query.insert("path", path);

        info!("Deleting page {} in wiki {}", path, wiki);

        self.execute(pages_request("delete_page", HttpMethod::Delete, wiki).query(query))
    }

    /// Delete a page by ID.
    pub fn delete_page_by_id(
        &self,
        wiki: &str,
        id: u32,
        options: &PageWriteOptions,
    ) -> Result<WikiPage, WikiError> {
        info!("Deleting page {} in wiki {}", id, wiki);

        self.execute(
            pages_request("delete_page_by_id", HttpMethod::Delete, wiki)
                .segment(id.to_string())
                .query(options.to_query()),
        )
    }
}

fn pages_request(operation: &'static str, method: HttpMethod, wiki: &str) -> RequestSpec {
    RequestSpec::new(operation, method)
        .wiki(wiki)
        .segment("pages")
        .api_version(API_VERSION_PAGES)
}
