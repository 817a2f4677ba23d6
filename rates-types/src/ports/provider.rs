//! Rate provider port.
//!
//! This trait defines the interface for external rate sources.
//! Implementations can be HTTP clients, synthetic generators, etc.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::CurrencyCode;

/// Error type for provider fetch operations.
///
/// Every failure mode of a provider - network error, timeout, non-2xx
/// response, malformed payload, missing target key - collapses into
/// `Unavailable`. The resolution layer treats them all the same way:
/// fall through to the next provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Port trait for rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the exchange rate for one unit of `base` expressed in
    /// `target`, valued on `date`.
    async fn fetch_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, ProviderError>;
}
