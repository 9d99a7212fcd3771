//! Task assignment and the status workflow.
//!
//! Admins assign tasks to accounts of their department; the assignee starts
//! work, and the assigning admin approves or rejects it. The master-admin
//! can act on any task and override its status. The module follows
//! hexagonal architecture:
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
