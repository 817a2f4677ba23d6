//! Storage port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use chrono::NaiveDate;

use crate::domain::{Currency, CurrencyCode, ExchangeRate, Provider, ProviderId};
use crate::dto::{CreateProviderRequest, UpdateProviderRequest};
use crate::error::StoreError;

/// The main storage port for currencies, providers and rate facts.
///
/// Rate writes MUST be idempotent on the `(base, target, date)` natural key:
/// re-ingesting an existing key is skipped (first-writer-wins), never
/// duplicated and never an error.
#[async_trait::async_trait]
pub trait RateStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a currency, returning the existing row if the code is known.
    async fn upsert_currency(&self, code: &CurrencyCode) -> Result<Currency, StoreError>;

    /// Gets a currency by code.
    async fn get_currency(&self, code: &CurrencyCode) -> Result<Option<Currency>, StoreError>;

    /// Lists all known currencies.
    async fn list_currencies(&self) -> Result<Vec<Currency>, StoreError>;

    /// Deletes a currency. Returns false if the code was unknown.
    async fn delete_currency(&self, code: &CurrencyCode) -> Result<bool, StoreError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Provider Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a provider record. Fails with `Conflict` on a duplicate name.
    async fn create_provider(&self, req: CreateProviderRequest) -> Result<Provider, StoreError>;

    /// Gets a provider by ID.
    async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError>;

    /// Lists all providers, active or not.
    async fn list_providers(&self) -> Result<Vec<Provider>, StoreError>;

    /// Partially updates a provider (name, kind, activation, priority).
    async fn update_provider(
        &self,
        id: ProviderId,
        req: UpdateProviderRequest,
    ) -> Result<Option<Provider>, StoreError>;

    /// Deletes a provider. Returns false if the ID was unknown.
    async fn delete_provider(&self, id: ProviderId) -> Result<bool, StoreError>;

    /// Lists active providers ordered by ascending priority, ties broken by
    /// insertion order. Callers re-read this snapshot per resolution attempt.
    async fn list_active_providers(&self) -> Result<Vec<Provider>, StoreError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Inserts a batch of rate facts, skipping rows whose natural key already
    /// exists. Atomic per call. Returns the number of rows actually inserted.
    async fn bulk_upsert_rates(&self, rows: &[ExchangeRate]) -> Result<u64, StoreError>;

    /// Queries rates for a base currency within an inclusive date range.
    async fn query_rates(
        &self,
        base: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, StoreError>;

    /// Paginated variant of `query_rates`. Returns the page and the total
    /// row count for the full range.
    async fn query_rates_page(
        &self,
        base: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ExchangeRate>, i64), StoreError>;
}
