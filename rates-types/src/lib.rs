//! # Rates Types
//!
//! Domain types and port traits for the FX rates service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, Provider, ExchangeRate)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Currency, CurrencyCode, ExchangeRate, Provider, ProviderId, ProviderKind, RATE_SCALE,
};
pub use dto::*;
pub use error::{AppError, DomainError, StoreError};
pub use ports::{
    GroupId, GroupStatus, JobId, JobRunner, JobSpec, JobState, ProviderError, QueueError,
    RateProvider, RateStore, TaskQueue,
};
