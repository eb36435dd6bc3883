//! Shared fixtures for client integration tests.

#![allow(dead_code)]

use std::time::Duration;

use azd_wiki::{Connection, WikiClient};
use mockito::{Matcher, ServerGuard};

pub const PROJECT: &str = "Fabrikam";
pub const WIKI: &str = "Fabrikam.wiki";
pub const TOKEN: &str = "pat";
/// `Basic base64(":pat")`.
pub const AUTHORIZATION: &str = "Basic OnBhdA==";

pub fn client(server: &ServerGuard) -> WikiClient {
    let connection = Connection::new(&server.url(), PROJECT).with_personal_access_token(TOKEN);
    WikiClient::with_timeout(connection, Duration::from_secs(5))
}

/// Path of a resource below the wikis area.
pub fn wikis_path(rest: &str) -> String {
    if rest.is_empty() {
        format!("/{PROJECT}/_apis/wiki/wikis")
    } else {
        format!("/{PROJECT}/_apis/wiki/wikis/{rest}")
    }
}

pub fn pages_path(rest: &str) -> String {
    if rest.is_empty() {
        wikis_path(&format!("{WIKI}/pages"))
    } else {
        wikis_path(&format!("{WIKI}/pages/{rest}"))
    }
}

pub fn api_version(version: &str) -> Matcher {
    Matcher::UrlEncoded("api-version".to_owned(), version.to_owned())
}

pub fn query(pairs: &[(&str, &str)]) -> Matcher {
    Matcher::AllOf(
        pairs
            .iter()
            .map(|(name, value)| Matcher::UrlEncoded((*name).to_owned(), (*value).to_owned()))
            .collect(),
    )
}

pub fn page_json(id: u32, path: &str) -> String {
    format!(r#"{{"id": {id}, "path": "{path}", "order": 0, "isParentPage": false}}"#)
}
