//! Store connectivity checks.

use crate::config::AppConfig;
use crate::task::ports::TaskRepository;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// `true` when the store answered.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Time spent waiting for the store.
    pub elapsed: Duration,
}

/// Runs the cheapest read the task store supports and reports the outcome.
///
/// Failures are reported, not returned, so callers can render them.
pub async fn probe_store(repository: &impl TaskRepository) -> ProbeReport {
    let started = Instant::now();
    let outcome = repository.probe().await;
    let elapsed = started.elapsed();

    match outcome {
        Ok(()) => {
            tracing::info!(elapsed = ?elapsed, "task store reachable");
            ProbeReport {
                success: true,
                message: "connected to task store".to_owned(),
                elapsed,
            }
        }
        Err(err) => {
            tracing::warn!(
                elapsed = ?elapsed,
                error = %err,
                "task store unreachable"
            );
            ProbeReport {
                success: false,
                message: format!("task store unreachable: {err}"),
                elapsed,
            }
        }
    }
}

/// Opens the configured document store and reports whether its root is
/// usable.
pub fn probe_document_store(config: &AppConfig) -> ProbeReport {
    let started = Instant::now();
    let outcome = config.open_document_store();
    let elapsed = started.elapsed();

    match outcome {
        Ok(_) => {
            tracing::info!(
                root = %config.document_root,
                base_url = %config.document_base_url,
                elapsed = ?elapsed,
                "document store ready"
            );
            ProbeReport {
                success: true,
                message: format!("document store ready at {}", config.document_root),
                elapsed,
            }
        }
        Err(err) => {
            tracing::warn!(
                root = %config.document_root,
                elapsed = ?elapsed,
                error = %err,
                "document store unavailable"
            );
            ProbeReport {
                success: false,
                message: format!("document store unavailable: {err}"),
                elapsed,
            }
        }
    }
}
