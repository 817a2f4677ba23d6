//! Provider fallback chain.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use rates_providers::ProviderRegistry;
use rates_types::{AppError, CurrencyCode, ProviderError, RateStore};

/// Resolves a rate for one currency pair and date by walking the active
/// providers in priority order and taking the first answer.
///
/// The provider list is reloaded from storage on every call, so activating,
/// deactivating or reprioritising a provider takes effect on the next
/// resolution without a restart.
pub struct RateResolver<S: RateStore> {
    store: Arc<S>,
    registry: ProviderRegistry,
}

// Manual impl: `S` itself need not be Clone behind the Arc.
impl<S: RateStore> Clone for RateResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<S: RateStore> RateResolver<S> {
    pub fn new(store: Arc<S>, registry: ProviderRegistry) -> Self {
        Self { store, registry }
    }

    /// Returns the first rate any active provider yields, or `None` once the
    /// whole chain is exhausted. A provider failure never aborts the walk;
    /// it is logged and the next provider is tried.
    pub async fn resolve(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, AppError> {
        let providers = self.store.list_active_providers().await?;

        for provider in providers {
            let adapter = self.registry.resolve(&provider);
            match adapter.fetch_rate(base, target, date).await {
                Ok(rate) => {
                    tracing::debug!(
                        provider = %provider.name,
                        %base, %target, %date, %rate,
                        "rate resolved"
                    );
                    return Ok(Some(rate));
                }
                Err(ProviderError::Unavailable(reason)) => {
                    tracing::warn!(
                        provider = %provider.name,
                        %base, %target, %date, %reason,
                        "provider failed, trying next"
                    );
                }
            }
        }

        Ok(None)
    }
}
