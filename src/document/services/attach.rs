//! Service layer for attaching documents to tasks.

use crate::auth::domain::{AccessError, Session};
use crate::document::{
    domain::{DocumentError, DocumentUpload},
    ports::{DocumentStore, DocumentStoreError},
};
use crate::task::{
    domain::{DocumentPath, Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for document attachment.
#[derive(Debug, Error)]
pub enum TaskDocumentError {
    /// The upload failed validation.
    #[error(transparent)]
    Upload(#[from] DocumentError),
    /// The storage path could not be built.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The session may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Document storage failed.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for document attachment.
pub type TaskDocumentResult<T> = Result<T, TaskDocumentError>;

/// Document attachment service.
#[derive(Clone)]
pub struct TaskDocumentService<T, S, C>
where
    T: TaskRepository,
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<T, S, C> TaskDocumentService<T, S, C>
where
    T: TaskRepository,
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Creates a new document service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            store,
            clock,
        }
    }

    /// Stores `upload` for the task and records its path, replacing any
    /// earlier document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentError::TaskNotFound`] for unknown tasks,
    /// [`AccessError::NotAssignee`] unless the caller is the assignee or the
    /// master-admin, and [`TaskDocumentError::Store`] when the write fails.
    pub async fn attach(
        &self,
        session: &Session,
        task_id: TaskId,
        upload: DocumentUpload,
    ) -> TaskDocumentResult<Task> {
        self.store_and_record(session, task_id, upload)
            .await
            .inspect_err(|err| {
                tracing::warn!(
                    task_id = %task_id,
                    user_id = %session.user_id(),
                    error = %err,
                    "document attachment failed"
                );
            })
    }

    async fn store_and_record(
        &self,
        session: &Session,
        task_id: TaskId,
        upload: DocumentUpload,
    ) -> TaskDocumentResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskDocumentError::TaskNotFound(task_id))?;
        if !session.is_master_admin() && task.assigned_to() != session.user_id() {
            return Err(AccessError::NotAssignee.into());
        }

        let path = DocumentPath::for_task(task_id, upload.file_name())?;
        self.store.put(&path, upload.bytes()).await?;
        task.attach_document(path, &*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(
            task_id = %task_id,
            path = ?task.document().map(DocumentPath::as_str),
            content_type = upload.content_type(),
            size = upload.bytes().len(),
            "document attached"
        );
        Ok(task)
    }

    /// Returns the public URL of the task's document, if it has one.
    #[must_use]
    pub fn document_url(&self, task: &Task) -> Option<String> {
        task.document().map(|path| self.store.public_url(path))
    }
}
