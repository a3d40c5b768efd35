//! Error types for the ore-ledger application.
//!
//! Domain errors (configuration, ledger consistency) are defined in submodules and
//! aggregated together with external library errors into the top-level [`Error`] type.
//! All errors use `thiserror` for `Display` and `Error` implementations, and can be
//! classified into retry strategies via [`Error::to_retry_strategy`].

pub mod config;
pub mod ledger;
pub mod retry;

use thiserror::Error;

use crate::error::{config::ConfigError, ledger::LedgerError};

/// Main error type for the ore-ledger application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Ledger errors (balance deltas for unknown miners/refineries, missing templates)
/// - External library errors (database, HTTP, Redis, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Ledger consistency error (unknown miner/refinery, missing template).
    #[error(transparent)]
    LedgerError(#[from] LedgerError),
    /// Internal error indicating a bug in ore-ledger's code.
    #[error("Internal error with ore-ledger's code, this indicates a bug: {0:?}")]
    InternalError(String),
    /// HTTP error when talking to ESI (timeouts, error statuses, malformed bodies).
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Redis error (run lock connection, script execution).
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}
