//! Unit tests for the auth module.
