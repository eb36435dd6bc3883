//! Wiki attachment types.

use serde::Deserialize;

use crate::inject::{Inject, Injected};

/// Wiki attachment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WikiAttachment {
    /// Attachment file name.
    pub name: String,
    /// Path to reference from page markdown (e.g. `/.attachments/image.png`).
    pub path: String,
    /// Concurrency token from the response header.
    #[serde(skip)]
    pub etag: Option<String>,
}

impl Inject for WikiAttachment {
    fn inject(&mut self, injected: Injected) {
        self.etag = injected.into_etag();
    }
}
