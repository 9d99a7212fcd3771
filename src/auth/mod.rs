//! Authentication and session handling.
//!
//! Login checks a username and password against the user store, counts
//! failures per client and picks a landing dashboard from the account role.
//! The resulting [`domain::Session`] is the explicit identity every
//! privileged service call receives.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
