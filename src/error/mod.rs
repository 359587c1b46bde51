//! Error types for the academy data-access layer.
//!
//! Errors are grouped by domain (configuration, query execution, authentication,
//! billing, documents) and aggregated into [`Error`]. Database errors that carry a
//! recognizable constraint violation are classified into [`QueryError`] variants when
//! converted; every other `DbErr` is passed through untouched.

pub mod auth;
pub mod billing;
pub mod config;
pub mod document;
pub mod query;
pub mod retry;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::error::{
    auth::AuthError, billing::BillingError, config::ConfigError, document::DocumentError,
    query::QueryError,
};

/// Main error type of the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Query error (record not found, constraint violations, invalid arguments).
    #[error(transparent)]
    QueryError(#[from] QueryError),
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Subscription, plan limit or payment rule violation.
    #[error(transparent)]
    BillingError(#[from] BillingError),
    /// Document upload or verification rule violation.
    #[error(transparent)]
    DocumentError(#[from] DocumentError),
    /// Password hashing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
    /// Internal error indicating a broken invariant in this crate's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues).
    #[error(transparent)]
    DbErr(DbErr),
}

/// Classifies constraint violations reported by the database driver.
///
/// Unique and foreign key violations become [`QueryError`] variants so callers can
/// match on them without inspecting driver messages.
impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                Error::QueryError(QueryError::UniqueConstraint(message))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                Error::QueryError(QueryError::ForeignKeyConstraint(message))
            }
            _ => Error::DbErr(err),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::PasswordHash(err.to_string())
    }
}

impl Error {
    /// Returns true when the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::QueryError(QueryError::NotFound { .. })
                | Error::DbErr(DbErr::RecordNotFound(_))
        )
    }
}
