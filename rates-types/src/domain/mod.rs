//! Domain models for the FX rates service.

pub mod currency;
pub mod provider;
pub mod rate;

pub use currency::{Currency, CurrencyCode};
pub use provider::{Provider, ProviderId, ProviderKind};
pub use rate::{ExchangeRate, RATE_SCALE};
