//! Wiki operations.

use serde_json::json;
use tracing::info;

use super::WikiClient;
use crate::error::WikiError;
use crate::request::{HttpMethod, RequestSpec};
use crate::types::{WikiCreateParameters, WikiV2, WikiV2Collection};

impl WikiClient {
    /// Create a wiki.
    ///
    /// The wiki type is sent in lowercase (`codewiki`, `projectwiki`).
    pub fn create_wiki(&self, params: &WikiCreateParameters) -> Result<WikiV2, WikiError> {
        let mut payload = json!({
            "name": params.name,
            "type": params.wiki_type.as_str(),
            "projectId": params.project_id,
        });

        if let Some(repository_id) = &params.repository_id {
            payload["repositoryId"] = json!(repository_id);
        }
        if let Some(mapped_path) = &params.mapped_path {
            payload["mappedPath"] = json!(mapped_path);
        }
        if let Some(branch) = &params.branch {
            payload["version"] = json!({ "version": branch });
        }

        info!("Creating {} '{}'", params.wiki_type.as_str(), params.name);

        let request = RequestSpec::new("create_wiki", HttpMethod::Post).json_body(&payload)?;
        let wiki: WikiV2 = self.execute(request)?;
        info!("Created wiki '{}' (id={})", wiki.name, wiki.id);
        Ok(wiki)
    }

    /// Delete a wiki by ID or name.
    pub fn delete_wiki(&self, wiki: &str) -> Result<WikiV2, WikiError> {
        info!("Deleting wiki {}", wiki);

        self.execute(RequestSpec::new("delete_wiki", HttpMethod::Delete).wiki(wiki))
    }

    /// Get a wiki by ID or name.
    pub fn get_wiki(&self, wiki: &str) -> Result<WikiV2, WikiError> {
        info!("Getting wiki {}", wiki);

        self.execute(RequestSpec::new("get_wiki", HttpMethod::Get).wiki(wiki))
    }

    /// List all wikis in the project.
    pub fn list_wikis(&self) -> Result<WikiV2Collection, WikiError> {
        info!("Listing wikis in project {}", self.connection.project());

        let wikis: WikiV2Collection =
            self.execute(RequestSpec::new("list_wikis", HttpMethod::Get))?;
        info!("Found {} wikis", wikis.count);
        Ok(wikis)
    }
}
