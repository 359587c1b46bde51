use std::time::Duration;

use thiserror::Error;

/// Errors raised by delegate operations.
#[derive(Error, Debug)]
pub enum QueryError {
    /// No record matched a unique key or a required `find_first`.
    ///
    /// Returned by the `*_or_throw` finders and by `update`/`delete` on a missing row.
    #[error("No {model} record found for the given criteria")]
    NotFound { model: &'static str },
    /// A unique constraint rejected the write.
    #[error("Unique constraint failed: {0}")]
    UniqueConstraint(String),
    /// A foreign key constraint rejected the write.
    #[error("Foreign key constraint failed: {0}")]
    ForeignKeyConstraint(String),
    /// Query arguments are inconsistent (e.g. group by without fields).
    #[error("Invalid query arguments: {0}")]
    Validation(String),
    /// An interactive transaction ran longer than its configured timeout and was rolled back.
    #[error("Transaction exceeded its timeout of {0:?} and was rolled back")]
    TransactionTimeout(Duration),
}
