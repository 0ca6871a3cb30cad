//! In-memory blob store — keyed byte buffers with `memory://` locators.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_app::ports::BlobStore;
use lumen_domain::error::LumenError;
use tokio::sync::RwLock;

/// Blob store keeping uploads in a map, keyed by their storage path.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored bytes for `key`, if anything was uploaded there.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let blobs = self.blobs.read().await;
        blobs.get(key).cloned()
    }
}

impl BlobStore for MemoryBlobStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, LumenError> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(key.to_string(), bytes);
        Ok(format!("memory://{key}"))
    }
}
