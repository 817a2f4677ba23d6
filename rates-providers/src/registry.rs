//! Provider registry: maps a stored `ProviderKind` to a concrete instance.

use std::sync::Arc;
use std::time::Duration;

use rates_types::{Provider, ProviderKind, RateProvider};

use crate::currencybeacon::CurrencyBeaconProvider;
use crate::synthetic::SyntheticProvider;

/// Configuration for building the registry.
pub struct RegistryConfig {
    /// CurrencyBeacon credential; without one the live kind degrades to the
    /// synthetic implementation
    pub currencybeacon_api_key: Option<String>,
    /// Outbound request timeout for live providers
    pub provider_timeout: Duration,
    /// Fixed seed for the synthetic generator (deterministic environments)
    pub synthetic_seed: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            currencybeacon_api_key: None,
            provider_timeout: Duration::from_secs(10),
            synthetic_seed: None,
        }
    }
}

/// Static mapping from provider kind to fetch implementation.
///
/// Instances are built once at startup and shared; the per-call decision of
/// WHICH providers to try, and in what order, stays with the resolution layer
/// reading provider records from storage.
#[derive(Clone)]
pub struct ProviderRegistry {
    currency_beacon: Arc<dyn RateProvider>,
    synthetic: Arc<dyn RateProvider>,
}

impl ProviderRegistry {
    /// Builds the registry from configuration.
    pub fn new(config: RegistryConfig) -> anyhow::Result<Self> {
        let synthetic: Arc<dyn RateProvider> = match config.synthetic_seed {
            Some(seed) => Arc::new(SyntheticProvider::seeded(seed)),
            None => Arc::new(SyntheticProvider::new()),
        };

        let currency_beacon: Arc<dyn RateProvider> = match config.currencybeacon_api_key {
            Some(key) if !key.is_empty() => Arc::new(CurrencyBeaconProvider::new(
                key,
                config.provider_timeout,
            )?),
            _ => {
                tracing::warn!(
                    "no CurrencyBeacon API key configured, live providers degrade to synthetic rates"
                );
                synthetic.clone()
            }
        };

        Ok(Self {
            currency_beacon,
            synthetic,
        })
    }

    /// Builds a registry from pre-constructed instances (tests).
    pub fn from_parts(
        currency_beacon: Arc<dyn RateProvider>,
        synthetic: Arc<dyn RateProvider>,
    ) -> Self {
        Self {
            currency_beacon,
            synthetic,
        }
    }

    /// Resolves a provider record to its fetch implementation.
    pub fn resolve(&self, provider: &Provider) -> Arc<dyn RateProvider> {
        match provider.kind {
            ProviderKind::CurrencyBeacon => self.currency_beacon.clone(),
            ProviderKind::Synthetic => self.synthetic.clone(),
        }
    }
}
