//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CurrencyCode, ExchangeRate, ProviderKind};
use crate::ports::GroupId;

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCurrencyRequest {
    /// Three-letter currency code
    #[schema(example = "EUR")]
    pub code: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a rate provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProviderRequest {
    /// Unique provider name
    #[schema(example = "currencybeacon")]
    pub name: String,
    /// Concrete fetch implementation to use
    pub kind: ProviderKind,
    /// Whether the provider participates in resolution
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Lower priority is tried first
    #[serde(default = "default_priority")]
    #[schema(example = 1)]
    pub priority: i32,
}

fn default_is_active() -> bool {
    true
}

fn default_priority() -> i32 {
    1
}

/// Partial update of a provider (activation, deactivation, reprioritization).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProviderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProviderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate query DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Paginated envelope for rate queries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedRatesResponse {
    /// Total rows matching the query across all pages
    pub count: i64,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<ExchangeRate>,
}

/// Response for an amount conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    pub source_currency: CurrencyCode,
    pub exchanged_currency: CurrencyCode,
    /// Amount requested, in source currency units
    #[schema(value_type = String, example = "100")]
    pub amount: Decimal,
    /// Rate used for the conversion
    #[schema(value_type = String, example = "1.087000")]
    pub rate: Decimal,
    #[schema(value_type = String, example = "108.70")]
    pub converted_amount: Decimal,
}

// ─────────────────────────────────────────────────────────────────────────────
// Ingestion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to backfill a historical date range.
///
/// Dates arrive as strings so missing or malformed values surface as a 400
/// at the boundary instead of a body-rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BackfillRequest {
    /// Inclusive start date (YYYY-MM-DD)
    #[schema(example = "2024-01-01")]
    pub start_date: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    #[schema(example = "2024-01-03")]
    pub end_date: Option<String>,
}

/// Response after submitting a backfill.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BackfillResponse {
    pub message: String,
    /// Group handle for polling progress
    pub task_id: GroupId,
}

/// Outcome of a single-day ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngestSummary {
    /// Ordered pairs attempted (N x (N-1) for N currencies)
    pub attempted: usize,
    /// Rows actually inserted (existing natural keys are skipped)
    pub stored: usize,
    /// Pairs for which no active provider yielded a rate
    pub failed: usize,
}
