//! Application services for task documents.

mod attach;

pub use attach::{TaskDocumentError, TaskDocumentResult, TaskDocumentService};
