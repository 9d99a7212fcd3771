//! Error types for document upload validation.

use thiserror::Error;

/// Errors returned while validating an upload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The file name is empty after trimming.
    #[error("document file name must not be empty")]
    EmptyFileName,

    /// The file name contains a path separator or is a relative component.
    #[error("invalid document file name '{0}'")]
    InvalidFileName(String),

    /// The file extension is not an accepted document format.
    #[error("unsupported document type '{0}'; upload a PDF or Word document")]
    UnsupportedExtension(String),

    /// The upload is larger than the size limit.
    #[error("document is {size} bytes; the limit is {limit} bytes")]
    TooLarge {
        /// Upload size in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },
}
