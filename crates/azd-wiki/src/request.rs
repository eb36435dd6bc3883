//! Request descriptions consumed by the dispatcher.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

use crate::connection::Connection;
use crate::error::WikiError;
use crate::params::QueryParams;

/// Resource area of every wiki request.
pub(crate) const AREA_WIKIS: &str = "wiki/wikis";

/// Api-version tag of wiki-level operations.
pub(crate) const API_VERSION_WIKI: &str = "7.1-preview.2";

/// Api-version tag of page, attachment and page-move operations.
pub(crate) const API_VERSION_PAGES: &str = "7.1-preview.1";

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const CONTENT_TYPE_TEXT: &str = "text/plain";
pub(crate) const CONTENT_TYPE_STREAM: &str = "application/octet-stream";
pub(crate) const CONTENT_TYPE_ZIP: &str = "application/zip";

/// Characters escaped inside a single path segment.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One wiki API request, built fresh per call and consumed by dispatch.
///
/// The URL is `{organization}/{project}/_apis/{area}[/{wiki}][/{segments}]`.
#[derive(Debug)]
pub(crate) struct RequestSpec {
    /// Facade operation name, carried into errors and logs.
    pub(crate) operation: &'static str,
    pub(crate) method: HttpMethod,
    area: &'static str,
    wiki: Option<String>,
    segments: Vec<String>,
    api_version: &'static str,
    query: QueryParams,
    body: Option<Vec<u8>>,
    headers: Vec<(&'static str, String)>,
}

impl RequestSpec {
    pub(crate) fn new(operation: &'static str, method: HttpMethod) -> Self {
        Self {
            operation,
            method,
            area: AREA_WIKIS,
            wiki: None,
            segments: Vec::new(),
            api_version: API_VERSION_WIKI,
            query: QueryParams::new(),
            body: None,
            headers: vec![("Accept", CONTENT_TYPE_JSON.to_owned())],
        }
    }

    /// Address a wiki by ID or name.
    pub(crate) fn wiki(mut self, wiki: &str) -> Self {
        self.wiki = Some(wiki.to_owned());
        self
    }

    /// Append a path segment below the wiki (e.g. `pages`, a page ID).
    pub(crate) fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub(crate) fn api_version(mut self, api_version: &'static str) -> Self {
        self.api_version = api_version;
        self
    }

    pub(crate) fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set a raw body with its content type.
    pub(crate) fn body(mut self, body: Vec<u8>, content_type: &str) -> Self {
        self.body = Some(body);
        self.header("Content-Type", content_type)
    }

    /// Serialize `payload` as the JSON body.
    pub(crate) fn json_body<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self, WikiError> {
        let bytes = serde_json::to_vec(payload).map_err(|source| WikiError::Encode {
            operation: self.operation,
            source,
        })?;
        Ok(self.body(bytes, CONTENT_TYPE_JSON))
    }

    /// Add a header, replacing a default or earlier value of the same name.
    pub(crate) fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name, value.into()));
        self
    }

    pub(crate) fn headers(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.headers.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub(crate) fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Full request URL for `connection`, including the query string.
    pub(crate) fn url(&self, connection: &Connection) -> String {
        let mut url = format!(
            "{}/{}/_apis/{}",
            connection.organization_url(),
            encode_segment(connection.project()),
            self.area
        );

        for segment in self.wiki.iter().chain(&self.segments) {
            url.push('/');
            url.push_str(&encode_segment(segment));
        }

        let mut query = self.query.clone();
        query.insert("api-version", self.api_version);
        url.push('?');
        url.push_str(&query.to_query_string());
        url
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string()
}
