//! Documents attached to tasks.
//!
//! Uploads are validated against the accepted formats and size limit,
//! written to a [`ports::DocumentStore`] under
//! `documents/<task-id>/<file-name>`, and the path is recorded on the task.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
