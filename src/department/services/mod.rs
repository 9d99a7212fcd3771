//! Application services for department administration.

mod catalog;

pub use catalog::{DepartmentError, DepartmentResult, DepartmentService};
