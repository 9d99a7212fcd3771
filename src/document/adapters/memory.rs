//! In-memory document store.

use crate::document::ports::{
    DocumentStore, DocumentStoreError, DocumentStoreResult, store::join_url,
};
use crate::task::domain::DocumentPath;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory document store.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    objects: Arc<RwLock<HashMap<DocumentPath, Vec<u8>>>>,
    base_url: String,
}

impl InMemoryDocumentStore {
    /// Creates an empty store whose public URLs start with `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            objects: Arc::default(),
            base_url: base_url.into(),
        }
    }

    /// Returns the number of stored objects.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Storage`] when the lock is poisoned.
    pub fn object_count(&self) -> DocumentStoreResult<usize> {
        let objects = self.objects.read().map_err(|err| {
            DocumentStoreError::storage(std::io::Error::other(err.to_string()))
        })?;
        Ok(objects.len())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, path: &DocumentPath, bytes: &[u8]) -> DocumentStoreResult<()> {
        let mut objects = self.objects.write().map_err(|err| {
            DocumentStoreError::storage(std::io::Error::other(err.to_string()))
        })?;
        objects.insert(path.clone(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> DocumentStoreResult<Option<Vec<u8>>> {
        let objects = self.objects.read().map_err(|err| {
            DocumentStoreError::storage(std::io::Error::other(err.to_string()))
        })?;
        Ok(objects.get(path).cloned())
    }

    fn public_url(&self, path: &DocumentPath) -> String {
        join_url(&self.base_url, path)
    }
}
