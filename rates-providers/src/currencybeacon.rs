//! Live CurrencyBeacon adapter.
//!
//! Wire contract: `GET {base_url}/v1/historical?api_key=..&base=EUR&date=2024-03-01`
//! returning a JSON body with a `rates` mapping keyed by target currency code.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

use rates_types::{CurrencyCode, ProviderError, RateProvider};

const DEFAULT_BASE_URL: &str = "https://api.currencybeacon.com";

/// Historical-rates payload. Anything beyond `rates` is ignored.
#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// HTTP client for the CurrencyBeacon historical-rates API.
///
/// Every request carries the configured timeout; a timed-out or failed fetch
/// surfaces as `ProviderError::Unavailable` so resolution falls through to
/// the next provider.
pub struct CurrencyBeaconProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CurrencyBeaconProvider {
    /// Creates a client with the given credential and request timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Overrides the API base URL (for tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Extracts the target rate from a payload, rejecting missing keys and
/// non-positive or non-finite values.
fn rate_from_payload(
    payload: &HistoricalResponse,
    target: &CurrencyCode,
) -> Result<Decimal, ProviderError> {
    let value = payload
        .rates
        .get(target.as_str())
        .copied()
        .ok_or_else(|| ProviderError::Unavailable(format!("no rate for {target} in payload")))?;

    // from_f64 rejects NaN/infinity and rounds away float noise.
    let rate = Decimal::from_f64(value)
        .filter(|r| *r > Decimal::ZERO)
        .ok_or_else(|| ProviderError::Unavailable(format!("invalid rate value {value}")))?;

    Ok(rate)
}

#[async_trait::async_trait]
impl RateProvider for CurrencyBeaconProvider {
    async fn fetch_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, ProviderError> {
        let url = format!("{}/v1/historical", self.base_url);
        let date_str = date.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("base", base.as_str()),
                ("date", date_str.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!("HTTP {status}")));
        }

        let payload: HistoricalResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("malformed payload: {e}")))?;

        rate_from_payload(&payload, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn payload(json: &str) -> HistoricalResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_rate_extracted_from_payload() {
        let body = payload(r#"{"date":"2024-03-01","rates":{"USD":1.087,"GBP":0.856}}"#);
        let rate = rate_from_payload(&body, &code("USD")).unwrap();
        assert_eq!(rate, dec!(1.087));
    }

    #[test]
    fn test_missing_target_is_unavailable() {
        let body = payload(r#"{"rates":{"USD":1.087}}"#);
        let result = rate_from_payload(&body, &code("JPY"));
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn test_missing_rates_object_is_unavailable() {
        let body = payload(r#"{"meta":{"code":200}}"#);
        let result = rate_from_payload(&body, &code("USD"));
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn test_non_positive_value_is_unavailable() {
        let body = payload(r#"{"rates":{"USD":0.0}}"#);
        let result = rate_from_payload(&body, &code("USD"));
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }
}
