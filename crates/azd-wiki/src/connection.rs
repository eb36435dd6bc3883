//! Organization endpoint, project scope and credentials.

use std::fmt;

use azd_config::ConnectionConfig;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;

/// Where and as whom wiki requests are sent.
#[derive(Clone)]
pub struct Connection {
    organization_url: String,
    project: String,
    personal_access_token: Option<String>,
}

impl Connection {
    /// Create an anonymous connection.
    ///
    /// # Arguments
    /// * `organization_url` - Organization base URL (e.g. `https://dev.azure.com/fabrikam`)
    /// * `project` - Project that scopes every request
    #[must_use]
    pub fn new(organization_url: &str, project: &str) -> Self {
        Self {
            organization_url: organization_url.trim_end_matches('/').to_owned(),
            project: project.to_owned(),
            personal_access_token: None,
        }
    }

    /// Authenticate with a personal access token.
    #[must_use]
    pub fn with_personal_access_token(mut self, token: impl Into<String>) -> Self {
        self.personal_access_token = Some(token.into());
        self
    }

    /// Organization base URL without trailing slash.
    pub fn organization_url(&self) -> &str {
        &self.organization_url
    }

    /// Project name or ID.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// `Authorization` header value, if a token is configured.
    pub(crate) fn authorization(&self) -> Option<String> {
        self.personal_access_token
            .as_ref()
            .map(|token| format!("Basic {}", BASE64_STANDARD.encode(format!(":{token}"))))
    }
}

impl From<&ConnectionConfig> for Connection {
    fn from(config: &ConnectionConfig) -> Self {
        let connection = Self::new(&config.organization_url, &config.project);
        match &config.personal_access_token {
            Some(token) => connection.with_personal_access_token(token.clone()),
            None => connection,
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("organization_url", &self.organization_url)
            .field("project", &self.project)
            .field(
                "personal_access_token",
                &self.personal_access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
