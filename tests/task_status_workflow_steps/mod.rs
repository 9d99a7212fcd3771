//! Step definitions for task status workflow scenarios.

mod given;
mod then;
mod when;
pub mod world;
