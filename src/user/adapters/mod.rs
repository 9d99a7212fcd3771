//! Persistence adapters for user accounts.
//!
//! - [`memory::InMemoryUserRepository`]: thread-safe in-memory storage
//! - [`postgres::PostgresUserRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM

pub mod memory;
pub mod postgres;
