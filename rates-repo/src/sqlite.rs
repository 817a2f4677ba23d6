//! SQLite storage adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{QueryBuilder, SqlitePool};
use std::str::FromStr;

use rates_types::{
    CreateProviderRequest, Currency, CurrencyCode, DomainError, ExchangeRate, Provider,
    ProviderId, RateStore, StoreError, UpdateProviderRequest,
};

use crate::types::{DbCurrency, DbProvider, DbRate};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite storage implementation.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/sqlite/0001_create_tables.sql");
        sqlx::raw_sql(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateStore for SqliteStore {
    async fn upsert_currency(&self, code: &CurrencyCode) -> Result<Currency, StoreError> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO currencies (code, created_at) VALUES (?, ?)
               ON CONFLICT (code) DO NOTHING"#,
        )
        .bind(code.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        self.get_currency(code)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn get_currency(&self, code: &CurrencyCode) -> Result<Option<Currency>, StoreError> {
        let row: Option<DbCurrency> =
            sqlx::query_as(r#"SELECT code, created_at FROM currencies WHERE code = ?"#)
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbCurrency::into_domain).transpose()
    }

    async fn list_currencies(&self) -> Result<Vec<Currency>, StoreError> {
        let rows: Vec<DbCurrency> =
            sqlx::query_as(r#"SELECT code, created_at FROM currencies ORDER BY code"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbCurrency::into_domain).collect()
    }

    async fn delete_currency(&self, code: &CurrencyCode) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM currencies WHERE code = ?"#)
            .bind(code.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_provider(&self, req: CreateProviderRequest) -> Result<Provider, StoreError> {
        let provider = Provider::new(req.name, req.kind, req.is_active, req.priority)
            .map_err(StoreError::Domain)?;

        sqlx::query(
            r#"INSERT INTO providers (id, name, kind, is_active, priority, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(provider.id.to_string())
        .bind(&provider.name)
        .bind(provider.kind.as_str())
        .bind(provider.is_active as i64)
        .bind(provider.priority)
        .bind(provider.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(format!("Provider '{}' already exists", provider.name))
            }
            _ => StoreError::Database(e.to_string()),
        })?;

        Ok(provider)
    }

    async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError> {
        let row: Option<DbProvider> = sqlx::query_as(
            r#"SELECT id, name, kind, is_active, priority, created_at
               FROM providers WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbProvider::into_domain).transpose()
    }

    async fn list_providers(&self) -> Result<Vec<Provider>, StoreError> {
        let rows: Vec<DbProvider> = sqlx::query_as(
            r#"SELECT id, name, kind, is_active, priority, created_at
               FROM providers ORDER BY priority ASC, created_at ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbProvider::into_domain).collect()
    }

    async fn update_provider(
        &self,
        id: ProviderId,
        req: UpdateProviderRequest,
    ) -> Result<Option<Provider>, StoreError> {
        let Some(mut provider) = self.get_provider(id).await? else {
            return Ok(None);
        };

        if let Some(name) = req.name {
            if name.trim().is_empty() {
                return Err(StoreError::Domain(DomainError::ValidationError(
                    "Provider name cannot be empty".into(),
                )));
            }
            provider.name = name;
        }
        if let Some(kind) = req.kind {
            provider.kind = kind;
        }
        if let Some(is_active) = req.is_active {
            provider.is_active = is_active;
        }
        if let Some(priority) = req.priority {
            provider.priority = priority;
        }

        sqlx::query(
            r#"UPDATE providers SET name = ?, kind = ?, is_active = ?, priority = ?
               WHERE id = ?"#,
        )
        .bind(&provider.name)
        .bind(provider.kind.as_str())
        .bind(provider.is_active as i64)
        .bind(provider.priority)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(format!("Provider '{}' already exists", provider.name))
            }
            _ => StoreError::Database(e.to_string()),
        })?;

        Ok(Some(provider))
    }

    async fn delete_provider(&self, id: ProviderId) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM providers WHERE id = ?"#)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_active_providers(&self) -> Result<Vec<Provider>, StoreError> {
        let rows: Vec<DbProvider> = sqlx::query_as(
            r#"SELECT id, name, kind, is_active, priority, created_at
               FROM providers WHERE is_active = 1
               ORDER BY priority ASC, created_at ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbProvider::into_domain).collect()
    }

    async fn bulk_upsert_rates(&self, rows: &[ExchangeRate]) -> Result<u64, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }

        // A single multi-row INSERT is one statement, hence one transaction.
        let mut builder = QueryBuilder::new(
            "INSERT INTO exchange_rates (base_currency, target_currency, date, rate) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(row.base_currency.as_str().to_owned())
                .push_bind(row.target_currency.as_str().to_owned())
                .push_bind(row.date.format("%Y-%m-%d").to_string())
                .push_bind(row.rate.to_string());
        });
        builder.push(" ON CONFLICT (base_currency, target_currency, date) DO NOTHING");

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn query_rates(
        &self,
        base: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, StoreError> {
        let rows: Vec<DbRate> = sqlx::query_as(
            r#"SELECT base_currency, target_currency, date, rate
               FROM exchange_rates
               WHERE base_currency = ? AND date >= ? AND date <= ?
               ORDER BY date ASC, target_currency ASC"#,
        )
        .bind(base.as_str())
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbRate::into_domain).collect()
    }

    async fn query_rates_page(
        &self,
        base: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ExchangeRate>, i64), StoreError> {
        let total: (i64,) = sqlx::query_as(
            r#"SELECT COUNT(*) FROM exchange_rates
               WHERE base_currency = ? AND date >= ? AND date <= ?"#,
        )
        .bind(base.as_str())
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows: Vec<DbRate> = sqlx::query_as(
            r#"SELECT base_currency, target_currency, date, rate
               FROM exchange_rates
               WHERE base_currency = ? AND date >= ? AND date <= ?
               ORDER BY date ASC, target_currency ASC
               LIMIT ? OFFSET ?"#,
        )
        .bind(base.as_str())
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let rates = rows
            .into_iter()
            .map(DbRate::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rates, total.0))
    }
}
