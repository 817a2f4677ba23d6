//! # Rates Providers
//!
//! Concrete `RateProvider` adapters and the registry that maps a stored
//! `ProviderKind` to an implementation.
//!
//! - `currencybeacon` - live HTTP client for the CurrencyBeacon historical API
//! - `synthetic` - pseudo-random generator for tests and staging
//! - `registry` - kind -> instance resolution

mod currencybeacon;
mod registry;
mod synthetic;

pub use currencybeacon::CurrencyBeaconProvider;
pub use registry::{ProviderRegistry, RegistryConfig};
pub use synthetic::SyntheticProvider;
