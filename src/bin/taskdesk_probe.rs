//! Checks that the configured task store answers and the document root is
//! usable.
//!
//! Usage:
//!
//! ```text
//! TASKDESK_DATABASE_URL=postgres://localhost/taskdesk taskdesk_probe
//! ```
//!
//! Settings come from the `TASKDESK_*` environment variables. The process
//! exits non-zero when either store is unavailable.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;
use taskdesk::config::AppConfig;
use taskdesk::health::{probe_document_store, probe_store};
use taskdesk::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use taskdesk::telemetry::init_tracing;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

fn main() -> Result<(), BoxError> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_filter)?;

    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool: TaskPgPool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build_unchecked(manager);
    let repository = PostgresTaskRepository::new(pool);

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let reports = [
        runtime.block_on(probe_store(&repository)),
        probe_document_store(&config),
    ];
    let failures: Vec<String> = reports
        .into_iter()
        .filter(|report| !report.success)
        .map(|report| report.message)
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("; ").into())
    }
}
