//! Synthetic rate generator.

use std::sync::Mutex;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use rates_types::{CurrencyCode, ProviderError, RateProvider};

/// Generates uniformly distributed pseudo-random rates in [0.5, 1.5] with
/// four decimal places. Always succeeds.
///
/// The random source is injectable: seed it for deterministic tests, or use
/// `new()` for an OS-seeded generator in staging environments without a live
/// credential.
pub struct SyntheticProvider {
    rng: Mutex<StdRng>,
}

impl SyntheticProvider {
    /// Creates a provider seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic provider from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RateProvider for SyntheticProvider {
    async fn fetch_rate(
        &self,
        _base: &CurrencyCode,
        _target: &CurrencyCode,
        _date: NaiveDate,
    ) -> Result<Decimal, ProviderError> {
        // Draw an integer in [5000, 15000] and scale by 10^-4, which is
        // exactly uniform over the 4-decimal grid of [0.5, 1.5].
        let units: i64 = self
            .rng
            .lock()
            .expect("synthetic rng poisoned")
            .random_range(5_000..=15_000);

        Ok(Decimal::new(units, 4))
    }
}
