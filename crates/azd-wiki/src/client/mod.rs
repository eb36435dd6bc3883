//! Azure DevOps wiki REST API client.
//!
//! Provides a sync HTTP client for the `wiki/wikis` resource family. Every
//! operation funnels through `WikiClient::dispatch`, which issues exactly
//! one request and returns the response with its body unread.

mod attachments;
mod page_moves;
mod pages;
mod wikis;

pub use pages::{PageQuery, PageWriteOptions};

use std::time::Duration;

use azd_config::ConnectionConfig;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::connection::Connection;
use crate::error::WikiError;
use crate::inject::Inject;
use crate::request::{HttpMethod, RequestSpec};
use crate::response::PendingResponse;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Azure DevOps wiki REST API client.
///
/// The client holds no per-request state and can be shared across threads.
pub struct WikiClient {
    agent: Agent,
    connection: Connection,
}

impl WikiClient {
    /// Create client with the default timeout.
    #[must_use]
    pub fn new(connection: Connection) -> Self {
        Self::with_timeout(connection, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create client with a global per-request timeout.
    #[must_use]
    pub fn with_timeout(connection: Connection, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .max_redirects(0)
            .build()
            .into();

        Self { agent, connection }
    }

    /// Create client from config values.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Config`] if the connection config is invalid.
    pub fn from_config(config: &ConnectionConfig) -> Result<Self, WikiError> {
        config.validate()?;
        Ok(Self::with_timeout(
            Connection::from(config),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// Connection the client talks to.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Issue `request` and materialize the JSON body into `T`.
    fn execute<T>(&self, request: RequestSpec) -> Result<T, WikiError>
    where
        T: DeserializeOwned + Inject,
    {
        self.dispatch(request)?.materialize()
    }

    /// Issue `request` and return the response with its body unread.
    ///
    /// Redirects are not followed. Non-success statuses, 3xx included, are
    /// read to completion and returned as [`WikiError::Status`].
    fn dispatch(&self, request: RequestSpec) -> Result<PendingResponse, WikiError> {
        let operation = request.operation;
        let url = request.url(&self.connection);

        debug!(operation, method = %request.method, url = %url, "Sending request");

        let result = match request.method {
            HttpMethod::Get => self.prepare(self.agent.get(&url), &request).call(),
            HttpMethod::Delete => self.prepare(self.agent.delete(&url), &request).call(),
            HttpMethod::Post => send(self.prepare(self.agent.post(&url), &request), &request),
            HttpMethod::Put => send(self.prepare(self.agent.put(&url), &request), &request),
            HttpMethod::Patch => send(self.prepare(self.agent.patch(&url), &request), &request),
        };
        let response = result.map_err(|source| WikiError::Transport { operation, source })?;

        let status = response.status().as_u16();
        debug!(operation, status, "Received response");

        if !response.status().is_success() {
            let error_body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(WikiError::Status {
                operation,
                status,
                body: error_body,
            });
        }

        Ok(PendingResponse::new(operation, response))
    }

    /// Apply credentials and the request's headers.
    fn prepare<B>(&self, mut builder: RequestBuilder<B>, request: &RequestSpec) -> RequestBuilder<B> {
        if let Some(auth_header) = self.connection.authorization() {
            builder = builder.header("Authorization", &auth_header);
        }
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        builder
    }
}

fn send(
    builder: RequestBuilder<WithBody>,
    request: &RequestSpec,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match request.body_bytes() {
        Some(body) => builder.send(body),
        None => builder.send_empty(),
    }
}
