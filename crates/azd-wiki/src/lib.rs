//! Typed client for the Azure DevOps wiki REST API.
//!
//! This crate covers the `wiki/wikis` resource family:
//! - [`WikiClient`]: sync client with one method per wiki, page, attachment
//!   and page-move operation
//! - [`types`]: records returned by the service, with the `ETag` of the
//!   response merged into pages, attachments and page moves
//!
//! # Optimistic concurrency
//!
//! Page edits require the `ETag` of the revision being replaced. Read the
//! page, then pass its `etag` back:
//!
//! ```ignore
//! use azd_wiki::{Connection, PageQuery, PageWriteOptions, WikiClient};
//!
//! let connection = Connection::new("https://dev.azure.com/fabrikam", "Fabrikam")
//!     .with_personal_access_token(token);
//! let client = WikiClient::new(connection);
//!
//! let page = client.get_page("Fabrikam.wiki", "/Home", &PageQuery::default())?;
//! let updated = client.create_or_update_page(
//!     "Fabrikam.wiki",
//!     "/Home",
//!     "# Welcome",
//!     page.etag.as_deref(),
//!     &PageWriteOptions::with_comment("Reword intro"),
//! )?;
//! ```

// API client
mod client;
pub use client::{PageQuery, PageWriteOptions, WikiClient};

// Connection settings
mod connection;
pub use connection::Connection;

// Request and response plumbing (internal)
mod inject;
mod params;
mod request;
mod response;

// Records
pub mod types;

// Errors
pub mod error;
pub use error::{WikiError, WikiErrorKind};

/// Streaming body returned by [`WikiClient::get_page_archive`].
pub use ureq::BodyReader;
