//! Runtime configuration read from `TASKDESK_*` environment variables.

use crate::document::{adapters::filesystem::FilesystemDocumentStore, ports::DocumentStoreResult};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Database connection string. Required.
pub const DATABASE_URL_VAR: &str = "TASKDESK_DATABASE_URL";
/// Directory holding uploaded task documents.
pub const DOCUMENT_ROOT_VAR: &str = "TASKDESK_DOCUMENT_ROOT";
/// Public prefix for document URLs.
pub const DOCUMENT_BASE_URL_VAR: &str = "TASKDESK_DOCUMENT_BASE_URL";
/// Maximum database pool size.
pub const POOL_SIZE_VAR: &str = "TASKDESK_POOL_SIZE";
/// Default `tracing` filter directive.
pub const LOG_VAR: &str = "TASKDESK_LOG";

const DEFAULT_DOCUMENT_ROOT: &str = "./documents";
const DEFAULT_DOCUMENT_BASE_URL: &str = "http://localhost/storage/task_documents";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_LOG: &str = "info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required setting {0}")]
    Missing(&'static str),
    /// A variable holds a value that cannot be used.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Root directory of the document store.
    pub document_root: Utf8PathBuf,
    /// Prefix for public document URLs.
    pub document_base_url: String,
    /// Maximum connections in the database pool.
    pub pool_size: u32,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `TASKDESK_DATABASE_URL` is unset
    /// and [`ConfigError::Invalid`] when the pool size is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_VAR).ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let document_root = read(DOCUMENT_ROOT_VAR)
            .map_or_else(|| Utf8PathBuf::from(DEFAULT_DOCUMENT_ROOT), Utf8PathBuf::from);
        let document_base_url =
            read(DOCUMENT_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_DOCUMENT_BASE_URL.to_owned());
        let pool_size = read(POOL_SIZE_VAR).map_or(Ok(DEFAULT_POOL_SIZE), parse_pool_size)?;
        let log_filter = read(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG.to_owned());

        Ok(Self {
            database_url,
            document_root,
            document_base_url,
            pool_size,
            log_filter,
        })
    }

    /// Opens the filesystem document store rooted at `document_root`,
    /// publishing URLs below `document_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::document::ports::DocumentStoreError::Storage`] when
    /// the root cannot be created or opened.
    pub fn open_document_store(&self) -> DocumentStoreResult<FilesystemDocumentStore> {
        FilesystemDocumentStore::open(&self.document_root, self.document_base_url.as_str())
    }
}

fn parse_pool_size(value: String) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::Invalid {
            name: POOL_SIZE_VAR,
            value,
        }),
    }
}
