//! Object storage port for task documents.

use crate::task::domain::DocumentPath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Object storage contract for task documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes an object, replacing any existing object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Storage`] when the write fails.
    async fn put(&self, path: &DocumentPath, bytes: &[u8]) -> DocumentStoreResult<()>;

    /// Reads an object. Returns `None` when nothing is stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Storage`] when the read fails.
    async fn get(&self, path: &DocumentPath) -> DocumentStoreResult<Option<Vec<u8>>>;

    /// Returns the public URL of the object at `path`.
    fn public_url(&self, path: &DocumentPath) -> String;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// Storage-layer failure.
    #[error("document storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

/// Joins `base_url` and `path` with exactly one `/`.
pub(crate) fn join_url(base_url: &str, path: &DocumentPath) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.as_str())
}
