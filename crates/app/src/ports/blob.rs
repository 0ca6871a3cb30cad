//! Blob store port — upload-by-key with durable download locators.

use std::future::Future;

use lumen_domain::error::LumenError;

/// External object storage for binary blobs (profile pictures).
pub trait BlobStore {
    /// Upload `bytes` under `key`, replacing any previous blob, and return
    /// a durable download locator for it.
    fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<String, LumenError>> + Send;
}
