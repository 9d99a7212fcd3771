//! Domain model for document uploads.

mod error;
mod upload;

pub use error::DocumentError;
pub use upload::{ALLOWED_EXTENSIONS, DocumentUpload, MAX_DOCUMENT_BYTES};
