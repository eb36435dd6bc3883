//! Error types for wiki API operations.

use azd_config::ConfigError;

/// Error from wiki API operations.
///
/// Every request-level variant names the facade operation that failed, so a
/// failure can be diagnosed without re-issuing the call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WikiError {
    /// HTTP request failed (connection refused, timeout, broken body stream).
    #[error("{operation}: HTTP request failed: {source}")]
    Transport {
        /// Facade operation name.
        operation: &'static str,
        /// Underlying transport error.
        source: ureq::Error,
    },

    /// HTTP response error (server returned a non-success status).
    #[error("{operation}: HTTP error: {status} - {body}")]
    Status {
        /// Facade operation name.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body does not match the expected shape.
    #[error("{operation}: invalid response body: {source}")]
    Decode {
        /// Facade operation name.
        operation: &'static str,
        /// Raw response body.
        body: String,
        /// JSON error.
        source: serde_json::Error,
    },

    /// Request body could not be serialized.
    #[error("{operation}: request body serialization failed")]
    Encode {
        /// Facade operation name.
        operation: &'static str,
        /// JSON error.
        source: serde_json::Error,
    },

    /// Invalid connection configuration.
    #[error("invalid connection configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Category of a [`WikiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WikiErrorKind {
    /// Network or timeout failure.
    Transport,
    /// Server rejected the request.
    Status,
    /// Response body did not deserialize.
    Decode,
    /// Request body did not serialize.
    Encode,
    /// Connection configuration rejected before any request.
    Config,
}

impl WikiError {
    /// Error category.
    #[must_use]
    pub fn kind(&self) -> WikiErrorKind {
        match self {
            Self::Transport { .. } => WikiErrorKind::Transport,
            Self::Status { .. } => WikiErrorKind::Status,
            Self::Decode { .. } => WikiErrorKind::Decode,
            Self::Encode { .. } => WikiErrorKind::Encode,
            Self::Config(_) => WikiErrorKind::Config,
        }
    }

    /// Operation that failed, for request-level errors.
    #[must_use]
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Encode { operation, .. } => Some(*operation),
            Self::Config(_) => None,
        }
    }

    /// HTTP status code of a rejected request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}
