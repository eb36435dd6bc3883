//! Header-derived values merged into deserialized records.
//!
//! Values are collected from one response into an [`Injected`] and handed
//! to the materializer together with that response's body. Nothing is
//! stored on the client, so overlapping requests cannot observe each
//! other's tokens.

/// Values taken from the headers of a single response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Injected {
    etag: Option<String>,
}

impl Injected {
    pub(crate) fn new(etag: Option<String>) -> Self {
        Self { etag }
    }

    /// Consume the concurrency token.
    pub(crate) fn into_etag(self) -> Option<String> {
        self.etag
    }
}

/// Record that accepts header-derived values after JSON decoding.
///
/// Records without such fields keep the default no-op.
pub(crate) trait Inject {
    fn inject(&mut self, _injected: Injected) {}
}
