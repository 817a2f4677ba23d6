//! Rate Application Service
//!
//! Orchestrates rate queries, conversion and catalog management through the
//! storage port. Contains NO infrastructure logic - pure business
//! orchestration.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use rates_types::{
    AppError, ConvertResponse, CreateCurrencyRequest, CreateProviderRequest, Currency,
    CurrencyCode, DomainError, ExchangeRate, PaginatedRatesResponse, Provider, ProviderId,
    RateStore, UpdateProviderRequest, RATE_SCALE,
};

use crate::resolve::RateResolver;

/// Largest page a single rates query may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Application service for rate operations.
///
/// Generic over `S: RateStore` - the adapter is injected at compile time,
/// which keeps the service testable against an in-memory store.
pub struct RateService<S: RateStore> {
    store: Arc<S>,
    resolver: RateResolver<S>,
}

impl<S: RateStore> Clone for RateService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            resolver: self.resolver.clone(),
        }
    }
}

impl<S: RateStore> RateService<S> {
    /// Creates a new rate service over the given store and provider chain.
    pub fn new(store: Arc<S>, resolver: RateResolver<S>) -> Self {
        Self { store, resolver }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rate queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists stored rates for a base currency over an inclusive date range.
    pub async fn list_rates(
        &self,
        base: CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, AppError> {
        if from > to {
            return Err(DomainError::InvalidDateRange {
                start: from,
                end: to,
            }
            .into());
        }
        self.require_currency(&base).await?;

        let rows = self.store.query_rates(&base, from, to).await?;
        if rows.is_empty() {
            return Err(AppError::NotFound(
                "No exchange rates found for the given criteria".into(),
            ));
        }
        Ok(rows)
    }

    /// Paginated variant of [`list_rates`](Self::list_rates).
    ///
    /// Unlike the flat listing, an empty page is a valid answer here (the
    /// caller may simply have walked past the last page).
    pub async fn list_rates_page(
        &self,
        base: CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedRatesResponse, AppError> {
        if from > to {
            return Err(DomainError::InvalidDateRange {
                start: from,
                end: to,
            }
            .into());
        }
        if page == 0 {
            return Err(AppError::BadRequest("Page numbers start at 1".into()));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "Page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        self.require_currency(&base).await?;

        let offset = i64::from(page - 1) * i64::from(page_size);
        let (results, count) = self
            .store
            .query_rates_page(&base, from, to, i64::from(page_size), offset)
            .await?;

        Ok(PaginatedRatesResponse {
            count,
            page,
            page_size,
            results,
        })
    }

    /// Converts an amount between two currencies at today's rate, resolved
    /// live through the provider chain.
    pub async fn convert(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        amount: Decimal,
    ) -> Result<ConvertResponse, AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }
        if source == target {
            return Err(DomainError::SameCurrencyPair(source).into());
        }
        self.require_currency(&source).await?;
        self.require_currency(&target).await?;

        let today = Utc::now().date_naive();
        let rate = self
            .resolver
            .resolve(&source, &target, today)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No provider could supply a current rate".into())
            })?
            .round_dp(RATE_SCALE);

        let converted_amount = (amount * rate).round_dp(RATE_SCALE);
        Ok(ConvertResponse {
            source_currency: source,
            exchanged_currency: target,
            amount,
            rate,
            converted_amount,
        })
    }

    async fn require_currency(&self, code: &CurrencyCode) -> Result<(), AppError> {
        match self.store.get_currency(code).await? {
            Some(_) => Ok(()),
            None => Err(AppError::BadRequest(format!("Unknown currency {code}"))),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Currency catalog
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a currency. Re-registering an existing code is a no-op that
    /// returns the original record.
    pub async fn register_currency(
        &self,
        req: CreateCurrencyRequest,
    ) -> Result<Currency, AppError> {
        let code = CurrencyCode::new(&req.code)?;
        Ok(self.store.upsert_currency(&code).await?)
    }

    pub async fn list_currencies(&self) -> Result<Vec<Currency>, AppError> {
        Ok(self.store.list_currencies().await?)
    }

    pub async fn get_currency(&self, code: &str) -> Result<Currency, AppError> {
        let code = CurrencyCode::new(code)?;
        self.store
            .get_currency(&code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Currency {code}")))
    }

    pub async fn delete_currency(&self, code: &str) -> Result<(), AppError> {
        let code = CurrencyCode::new(code)?;
        if self.store.delete_currency(&code).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Currency {code}")))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Provider catalog
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_provider(
        &self,
        req: CreateProviderRequest,
    ) -> Result<Provider, AppError> {
        Ok(self.store.create_provider(req).await?)
    }

    pub async fn list_providers(&self) -> Result<Vec<Provider>, AppError> {
        Ok(self.store.list_providers().await?)
    }

    pub async fn get_provider(&self, id: ProviderId) -> Result<Provider, AppError> {
        self.store
            .get_provider(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Provider {id}")))
    }

    pub async fn update_provider(
        &self,
        id: ProviderId,
        req: UpdateProviderRequest,
    ) -> Result<Provider, AppError> {
        self.store
            .update_provider(id, req)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Provider {id}")))
    }

    pub async fn delete_provider(&self, id: ProviderId) -> Result<(), AppError> {
        if self.store.delete_provider(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Provider {id}")))
        }
    }
}
