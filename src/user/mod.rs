//! User accounts and department membership.
//!
//! Accounts log in with a username and password, belong to at most one
//! department and carry the admin and master-admin flags that decide what
//! they may do elsewhere in the crate.
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
