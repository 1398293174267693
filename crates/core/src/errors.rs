//! Core error types.
//!
//! Database-agnostic: storage-specific errors (Diesel, r2d2) are
//! converted into [`DatabaseError`] by the storage layer before they
//! reach this crate.

use std::collections::BTreeMap;

use countrycache_country_data::SourceError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the service.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("External data source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("Input validation failed")]
    Validation(#[from] ValidationFailure),

    #[error("Record not found")]
    NotFound,

    #[error("Summary artifact error: {0}")]
    Artifact(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// Uses `String` for every detail so the storage layer can fold its
/// engine-specific errors into this format.
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

    /// A database transaction failed and was rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Per-field validation errors for request input.
///
/// The field map is surfaced verbatim in the HTTP 400 body's `details`.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("Input validation failed")]
pub struct ValidationFailure {
    pub details: BTreeMap<String, String>,
}

impl ValidationFailure {
    pub fn new() -> Self {
        Self::default()
    }

    /// A failure with exactly one offending field.
    pub fn single(field: &str, message: &str) -> Self {
        let mut failure = Self::new();
        failure.push(field, message);
        failure
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.details.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
