//! Response handling: concurrency-token extraction and materialization.
//!
//! A [`PendingResponse`] is returned once the status line and headers have
//! been received; the body is still unread. The consumer decides how to read
//! it: [`PendingResponse::materialize`] for JSON records, [`PendingResponse::text`]
//! or [`PendingResponse::into_reader`] for literal content.

use serde::de::DeserializeOwned;
use ureq::http::{HeaderMap, Response};
use ureq::{Body, BodyReader};

use crate::error::WikiError;
use crate::inject::{Inject, Injected};

/// Largest body read into memory. Larger bodies fail with `Transport`.
pub(crate) const MAX_BODY_SIZE: u64 = 1 << 30;

/// Response header carrying the concurrency token.
pub(crate) const ETAG_HEADER: &str = "etag";

/// Read the concurrency token from response headers.
///
/// Uses the first `etag` value with every `"` removed. An absent, non-UTF-8
/// or empty value yields `None`.
pub(crate) fn extract_etag(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(ETAG_HEADER)?.to_str().ok()?;
    let stripped = raw.replace('"', "");
    (!stripped.is_empty()).then_some(stripped)
}

/// Decode a JSON body into `T` and merge the header-derived values.
pub(crate) fn decode<T>(operation: &'static str, body: String, injected: Injected) -> Result<T, WikiError>
where
    T: DeserializeOwned + Inject,
{
    let mut value: T = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(source) => return Err(WikiError::Decode { operation, body, source }),
    };
    value.inject(injected);
    Ok(value)
}

/// Successful response whose body has not been read yet.
pub(crate) struct PendingResponse {
    operation: &'static str,
    headers: HeaderMap,
    body: Body,
}

impl PendingResponse {
    pub(crate) fn new(operation: &'static str, response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            operation,
            headers: parts.headers,
            body,
        }
    }

    /// Header-derived values for this response only.
    pub(crate) fn injected(&self) -> Injected {
        Injected::new(extract_etag(&self.headers))
    }

    /// Read the body as JSON into `T`, with this response's `ETag` injected.
    pub(crate) fn materialize<T>(self) -> Result<T, WikiError>
    where
        T: DeserializeOwned + Inject,
    {
        let injected = self.injected();
        let operation = self.operation;
        let body = self.text()?;
        decode(operation, body, injected)
    }

    /// Read the whole body as UTF-8 text.
    pub(crate) fn text(mut self) -> Result<String, WikiError> {
        let operation = self.operation;
        self.body
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_string()
            .map_err(|source| WikiError::Transport { operation, source })
    }

    /// Stream the body without buffering.
    pub(crate) fn into_reader(self) -> BodyReader<'static> {
        self.body.into_reader()
    }
}
