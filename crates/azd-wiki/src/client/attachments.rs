//! Attachment operations.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use tracing::info;

use super::WikiClient;
use crate::error::WikiError;
use crate::params::QueryParams;
use crate::request::{API_VERSION_PAGES, CONTENT_TYPE_STREAM, HttpMethod, RequestSpec};
use crate::types::{VersionDescriptor, WikiAttachment};

impl WikiClient {
    /// Upload an attachment to a wiki.
    ///
    /// The endpoint only accepts base64 text, so `data` is encoded before
    /// upload. The returned attachment carries the `etag` of the wiki
    /// revision that added it.
    pub fn create_attachment(
        &self,
        wiki: &str,
        name: &str,
        data: &[u8],
        version: Option<&VersionDescriptor>,
    ) -> Result<WikiAttachment, WikiError> {
        let mut query = QueryParams::new();
        query.insert("name", name).version(version);

        info!("Uploading attachment '{}' ({} bytes) to wiki {}", name, data.len(), wiki);

        let body = BASE64_STANDARD.encode(data).into_bytes();
        let request = RequestSpec::new("create_attachment", HttpMethod::Put)
            .wiki(wiki)
            .segment("attachments")
            .api_version(API_VERSION_PAGES)
            .query(query)
            .body(body, CONTENT_TYPE_STREAM);

        let attachment: WikiAttachment = self.execute(request)?;
        info!("Uploaded attachment '{}' at {}", attachment.name, attachment.path);
        Ok(attachment)
    }
}
