//! Domain model for authentication and session access checks.

mod error;
mod gate;
mod landing;
mod session;

pub use error::AccessError;
pub use gate::{DECOY_USERNAME, FailedAttempt, LoginGate, MAX_LOGIN_ATTEMPTS};
pub use landing::Landing;
pub use session::Session;
