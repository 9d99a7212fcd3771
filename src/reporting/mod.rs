//! Master-admin dashboard figures.
//!
//! Counts are derived from the user and task repositories on request; no
//! aggregate is stored.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
