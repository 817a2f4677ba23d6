//! Error types for the FX rates service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::CurrencyCode;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Base and target currency are both {0}")]
    SameCurrencyPair(CurrencyCode),

    #[error("Rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    #[error("Unknown provider kind: {0:?}")]
    UnknownProviderKind(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Storage-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses and job outcomes).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(DomainError::ValidationError(msg)) => AppError::BadRequest(msg),
            StoreError::Domain(e) => AppError::BadRequest(e.to_string()),
            StoreError::NotFound => AppError::NotFound("Resource not found".into()),
            StoreError::Database(e) => AppError::Internal(e),
            StoreError::Conflict(e) => AppError::BadRequest(e),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<crate::ports::QueueError> for AppError {
    fn from(err: crate::ports::QueueError) -> Self {
        AppError::Internal(err.to_string())
    }
}
