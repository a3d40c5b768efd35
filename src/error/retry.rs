use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (server errors)
    Retry,
    /// Failed permanently (bad request)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // ESI request errors - internal errors, bad requests, malformed bodies
            Self::HttpError(reqwest_error) => {
                if let Some(status) = reqwest_error.status() {
                    match status {
                        // 500 - Internal Server Error
                        //
                        // ESI is temporarily unavailable, backoff and retry later.
                        s if s.is_server_error() => ErrorRetryStrategy::Retry,

                        // 400 - Client Error
                        // Unknown type ID or an invalid request, retrying won't change the outcome.
                        s if s.is_client_error() => ErrorRetryStrategy::Fail,

                        // Unexpected response
                        _ => ErrorRetryStrategy::Fail,
                    }
                } else if reqwest_error.is_decode() || reqwest_error.is_builder() {
                    // Malformed response body or request, permanent until ESI or our code changes
                    ErrorRetryStrategy::Fail
                } else {
                    // Network error, timeout or connection issue - should retry
                    ErrorRetryStrategy::Retry
                }
            }

            Self::DbErr(db_err) => {
                match db_err {
                    // Connection acquisition errors - transient, should retry
                    DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                    // Connection errors - transient, should retry
                    DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                    // All other database errors are permanent failures:
                    // - Query errors (constraint violations, syntax errors, etc.)
                    // - Type conversion errors
                    // - Schema/migration errors
                    // - Record not found/inserted/updated
                    _ => ErrorRetryStrategy::Fail,
                }
            }

            // Redis errors - transient, could be connection issues
            Self::RedisError(_) => ErrorRetryStrategy::Retry,

            // Configuration errors - permanent failures, won't resolve with retry
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,

            // Ledger errors - data inconsistencies an operator has to resolve
            Self::LedgerError(_) => ErrorRetryStrategy::Fail,

            // InternalError - permanent failures (internal error within ore-ledger's code)
            Self::InternalError(_) => ErrorRetryStrategy::Fail,

            // Job scheduler errors - permanent failures (configuration issue)
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
