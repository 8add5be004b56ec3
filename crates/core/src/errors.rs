//! Core error types for the Lotbook ledger.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::transactions::TransactionError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger.
///
/// Pure calculation functions never return this type; it is produced by the
/// validation boundary (commands, services) and by repositories.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for repository operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must be positive, got {value}")]
    NonPositive { field: String, value: String },

    #[error("Field '{field}' must not be negative, got {value}")]
    Negative { field: String, value: String },

    #[error("Field '{field}' must be at most {max}, got {value}")]
    TooLarge {
        field: String,
        value: String,
        max: String,
    },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),

    #[error("Malformed JSON document: {0}")]
    Json(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::Json(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

/// Rejects zero and negative values for a named input field.
pub(crate) fn ensure_positive(field: &str, value: rust_decimal::Decimal) -> Result<()> {
    if value <= rust_decimal::Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NonPositive {
            field: field.to_string(),
            value: value.to_string(),
        }));
    }
    Ok(())
}

/// Rejects negative values for a named input field.
pub(crate) fn ensure_non_negative(field: &str, value: rust_decimal::Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::Validation(ValidationError::Negative {
            field: field.to_string(),
            value: value.to_string(),
        }));
    }
    Ok(())
}

/// Rejects values whose magnitude exceeds `max`.
pub(crate) fn ensure_at_most(
    field: &str,
    value: rust_decimal::Decimal,
    max: rust_decimal::Decimal,
) -> Result<()> {
    if value.abs() > max {
        return Err(Error::Validation(ValidationError::TooLarge {
            field: field.to_string(),
            value: value.to_string(),
            max: max.to_string(),
        }));
    }
    Ok(())
}
