//! Document store writing below a capability-scoped directory.

use crate::document::ports::{
    DocumentStore, DocumentStoreError, DocumentStoreResult, store::join_url,
};
use crate::task::domain::DocumentPath;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

/// Filesystem-backed document store.
///
/// Every object path is resolved inside the root directory handle, so stored
/// paths cannot reach outside it.
#[derive(Debug, Clone)]
pub struct FilesystemDocumentStore {
    root: Arc<Dir>,
    base_url: String,
}

impl FilesystemDocumentStore {
    /// Opens (creating when missing) the root directory.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Utf8Path, base_url: impl Into<String>) -> DocumentStoreResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(DocumentStoreError::storage)?;
        let dir =
            Dir::open_ambient_dir(root, ambient_authority()).map_err(DocumentStoreError::storage)?;
        tracing::debug!(root = %root, "document store opened");
        Ok(Self {
            root: Arc::new(dir),
            base_url: base_url.into(),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> DocumentStoreResult<T>
    where
        F: FnOnce(&Dir) -> std::io::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(DocumentStoreError::storage)?
            .map_err(DocumentStoreError::storage)
    }
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
    async fn put(&self, path: &DocumentPath, bytes: &[u8]) -> DocumentStoreResult<()> {
        let relative = Utf8PathBuf::from(path.as_str());
        let contents = bytes.to_vec();
        self.run_blocking(move |root| {
            if let Some(parent) = relative.parent().filter(|dir| !dir.as_str().is_empty()) {
                root.create_dir_all(parent)?;
            }
            root.write(&relative, contents)
        })
        .await?;
        tracing::debug!(path = %path, size = bytes.len(), "document written");
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> DocumentStoreResult<Option<Vec<u8>>> {
        let relative = Utf8PathBuf::from(path.as_str());
        self.run_blocking(move |root| match root.read(&relative) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }

    fn public_url(&self, path: &DocumentPath) -> String {
        join_url(&self.base_url, path)
    }
}
