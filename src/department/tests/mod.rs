//! Unit tests for the department module.
