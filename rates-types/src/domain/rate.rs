//! Exchange rate fact model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// Fixed scale for stored rate values (fractional digits).
pub const RATE_SCALE: u32 = 6;

/// A rate fact: how many units of `target_currency` one unit of
/// `base_currency` bought on `date`.
///
/// The triple `(base_currency, target_currency, date)` is the natural key;
/// storage holds at most one row per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRate {
    pub base_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    /// Positive rate value, fixed scale of 6 fractional digits
    #[schema(value_type = String, example = "1.087000")]
    pub rate: Decimal,
    /// Valuation date
    #[schema(value_type = String, example = "2024-03-01")]
    pub date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new rate fact, normalizing the value to the fixed scale.
    ///
    /// # Validation
    /// - Base and target must differ
    /// - Rate must be positive
    pub fn new(
        base_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: Decimal,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if base_currency == target_currency {
            return Err(DomainError::SameCurrencyPair(base_currency));
        }
        if rate <= Decimal::ZERO {
            return Err(DomainError::NonPositiveRate(rate));
        }

        Ok(Self {
            base_currency,
            target_currency,
            rate: rate.round_dp(RATE_SCALE),
            date,
        })
    }

    /// Reconstructs a rate from stored fields without re-validation.
    pub fn from_parts(
        base_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            base_currency,
            target_currency,
            rate,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_rate_creation() {
        let rate = ExchangeRate::new(code("EUR"), code("USD"), dec!(1.087), date("2024-03-01"))
            .unwrap();
        assert_eq!(rate.rate, dec!(1.087));
    }

    #[test]
    fn test_rate_rounded_to_fixed_scale() {
        let rate = ExchangeRate::new(
            code("EUR"),
            code("USD"),
            dec!(1.08765432199),
            date("2024-03-01"),
        )
        .unwrap();
        assert_eq!(rate.rate, dec!(1.087654));
    }

    #[test]
    fn test_same_pair_rejected() {
        let result = ExchangeRate::new(code("EUR"), code("EUR"), dec!(1.0), date("2024-03-01"));
        assert!(matches!(result, Err(DomainError::SameCurrencyPair(_))));
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        for value in [dec!(0), dec!(-1.2)] {
            let result = ExchangeRate::new(code("EUR"), code("USD"), value, date("2024-03-01"));
            assert!(matches!(result, Err(DomainError::NonPositiveRate(_))));
        }
    }
}
