//! Page move operations.

use tracing::info;

use super::{PageWriteOptions, WikiClient};
use crate::error::WikiError;
use crate::request::{API_VERSION_PAGES, HttpMethod, RequestSpec};
use crate::types::{WikiPageMove, WikiPageMoveParameters};

impl WikiClient {
    /// Move a page to a new path and/or position.
    pub fn create_page_move(
        &self,
        wiki: &str,
        params: &WikiPageMoveParameters,
        options: &PageWriteOptions,
    ) -> Result<WikiPageMove, WikiError> {
        info!("Moving page {} to {} in wiki {}", params.path, params.new_path, wiki);

        let request = RequestSpec::new("create_page_move", HttpMethod::Post)
            .wiki(wiki)
            .segment("pagemoves")
            .api_version(API_VERSION_PAGES)
            .query(options.to_query())
            .json_body(params)?;

        self.execute(request)
    }
}
