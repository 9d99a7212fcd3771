//! Storage path of a document attached to a task.

use super::{TaskDomainError, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage object path, `documents/<task-id>/<file-name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Builds the storage path for a file attached to `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDocumentName`] when the file name is
    /// blank, contains a path separator or is a relative path component.
    pub fn for_task(task_id: TaskId, file_name: &str) -> Result<Self, TaskDomainError> {
        let trimmed = file_name.trim();
        let is_valid = !trimmed.is_empty()
            && trimmed != "."
            && trimmed != ".."
            && !trimmed.contains(['/', '\\']);
        if !is_valid {
            return Err(TaskDomainError::InvalidDocumentName(file_name.to_owned()));
        }
        Ok(Self(format!("documents/{task_id}/{trimmed}")))
    }

    /// Wraps a path read back from storage.
    #[must_use]
    pub const fn from_stored(path: String) -> Self {
        Self(path)
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final path segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl AsRef<str> for DocumentPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
