//! Application services for login.

mod login;

pub use login::{LoginError, LoginOutcome, LoginService};
