//! Database error types shared across services

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors produced by the database layer
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a connection to PostgreSQL
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query failed at execution time
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Schema migration failure
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Invalid or missing configuration
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
