//! Port contracts for document storage.

pub mod store;

pub use store::{DocumentStore, DocumentStoreError, DocumentStoreResult};
