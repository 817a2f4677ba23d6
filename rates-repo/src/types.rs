//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;
use std::str::FromStr;

use rates_types::{
    Currency, CurrencyCode, ExchangeRate, Provider, ProviderId, ProviderKind, StoreError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(not(feature = "sqlite"))]
use rust_decimal::Decimal;
use uuid::Uuid;

#[cfg(feature = "sqlite")]
fn parse_timestamp(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, StoreError> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| StoreError::Database(format!("invalid timestamp {raw:?}: {e}")))
}

#[cfg(feature = "sqlite")]
fn parse_date(raw: &str) -> Result<chrono::NaiveDate, StoreError> {
    raw.parse()
        .map_err(|e| StoreError::Database(format!("invalid date {raw:?}: {e}")))
}

fn parse_code(raw: &str) -> Result<CurrencyCode, StoreError> {
    CurrencyCode::new(raw).map_err(|e| StoreError::Database(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Currency row from database.
#[derive(FromRow)]
pub struct DbCurrency {
    pub code: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

impl DbCurrency {
    pub fn into_domain(self) -> Result<Currency, StoreError> {
        let code = parse_code(&self.code)?;

        #[cfg(not(feature = "sqlite"))]
        let created_at = self.created_at;
        #[cfg(feature = "sqlite")]
        let created_at = parse_timestamp(&self.created_at)?;

        Ok(Currency::from_parts(code, created_at))
    }
}

/// Provider row from database.
#[derive(FromRow)]
pub struct DbProvider {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub name: String,
    pub kind: String,

    #[cfg(not(feature = "sqlite"))]
    pub is_active: bool,
    #[cfg(feature = "sqlite")]
    pub is_active: i64,

    pub priority: i32,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

impl DbProvider {
    pub fn into_domain(self) -> Result<Provider, StoreError> {
        let kind = ProviderKind::from_str(&self.kind)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        #[cfg(not(feature = "sqlite"))]
        let (id, is_active, created_at) = (self.id, self.is_active, self.created_at);

        #[cfg(feature = "sqlite")]
        let (id, is_active, created_at) = (
            Uuid::parse_str(&self.id)
                .map_err(|e| StoreError::Database(format!("invalid provider id: {e}")))?,
            self.is_active != 0,
            parse_timestamp(&self.created_at)?,
        );

        Ok(Provider::from_parts(
            ProviderId::from_uuid(id),
            self.name,
            kind,
            is_active,
            self.priority,
            created_at,
        ))
    }
}

/// Exchange rate row from database.
#[derive(FromRow)]
pub struct DbRate {
    pub base_currency: String,
    pub target_currency: String,

    #[cfg(not(feature = "sqlite"))]
    pub date: NaiveDate,
    #[cfg(feature = "sqlite")]
    pub date: String,

    #[cfg(not(feature = "sqlite"))]
    pub rate: Decimal,
    #[cfg(feature = "sqlite")]
    pub rate: String,
}

impl DbRate {
    pub fn into_domain(self) -> Result<ExchangeRate, StoreError> {
        let base = parse_code(&self.base_currency)?;
        let target = parse_code(&self.target_currency)?;

        #[cfg(not(feature = "sqlite"))]
        let (date, rate) = (self.date, self.rate);

        #[cfg(feature = "sqlite")]
        let (date, rate) = (
            parse_date(&self.date)?,
            rust_decimal::Decimal::from_str(&self.rate)
                .map_err(|e| StoreError::Database(format!("invalid rate {:?}: {e}", self.rate)))?,
        );

        Ok(ExchangeRate::from_parts(base, target, rate, date))
    }
}
