//! Taskdesk: departmental field-task assignment and tracking.
//!
//! Admins assign tasks to members of their department, members report
//! progress and attach evidence documents, and the master-admin manages
//! departments, accounts and the organisation-wide dashboard.
//!
//! # Architecture
//!
//! Each context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`,
//!   filesystem)
//! - **Services**: Role-checked operations over the ports
//!
//! # Modules
//!
//! - [`user`]: Accounts, roles and password digests
//! - [`auth`]: Login, sessions and role checks
//! - [`task`]: Task assignment and the status workflow
//! - [`department`]: Department provisioning, renaming and deletion
//! - [`document`]: Evidence uploads attached to tasks
//! - [`reporting`]: Master-admin dashboard figures
//! - [`health`]: Task and document store checks
//! - [`config`]: Environment configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod auth;
pub mod config;
pub mod department;
pub mod document;
pub mod health;
pub mod reporting;
pub mod task;
pub mod telemetry;
pub mod user;
