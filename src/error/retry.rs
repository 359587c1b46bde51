use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with backoff (transient failures)
    Retry,
    /// Failed permanently
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon the error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                // Connection acquisition and connection errors are transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query errors, type conversion, schema errors and missing records
                // won't resolve by trying again
                _ => ErrorRetryStrategy::Fail,
            },

            // A timed out transaction was rolled back, running it again is safe
            Self::QueryError(super::query::QueryError::TransactionTimeout(_)) => {
                ErrorRetryStrategy::Retry
            }

            Self::QueryError(_) => ErrorRetryStrategy::Fail,
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::AuthError(_) => ErrorRetryStrategy::Fail,
            Self::BillingError(_) => ErrorRetryStrategy::Fail,
            Self::DocumentError(_) => ErrorRetryStrategy::Fail,
            Self::PasswordHash(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
