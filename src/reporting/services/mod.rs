//! Application services for dashboard reporting.

mod dashboard;

pub use dashboard::{DashboardService, ReportingError, ReportingResult};
