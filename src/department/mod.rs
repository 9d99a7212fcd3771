//! Departments derived from account membership.
//!
//! A department exists while at least one account names it. Creating a
//! department provisions its admin account; renaming and deleting act on
//! every member (and, for deletion, every task those members touch).

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
