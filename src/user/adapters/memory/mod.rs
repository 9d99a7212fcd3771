//! In-memory adapters for user account persistence.

mod user;

pub use user::InMemoryUserRepository;
