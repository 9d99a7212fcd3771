//! Storage adapters for task documents.
//!
//! - [`memory::InMemoryDocumentStore`]: objects held in a map
//! - [`filesystem::FilesystemDocumentStore`]: objects written below a
//!   capability-scoped directory

pub mod filesystem;
pub mod memory;
