//! # Rates Client SDK
//!
//! A typed Rust client for the FX rates API.

use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use rates_types::{
    BackfillRequest, BackfillResponse, ConvertResponse, CreateCurrencyRequest,
    CreateProviderRequest, Currency, ExchangeRate, GroupId, GroupStatus, PaginatedRatesResponse,
    Provider, ProviderId, UpdateProviderRequest,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// FX rates API client.
pub struct RatesClient {
    base_url: String,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rates
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists stored rates for a base currency over an inclusive date range.
    pub async fn list_rates(
        &self,
        source_currency: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, ClientError> {
        self.get(&format!(
            "/currency-rates/list?source_currency={source_currency}&date_from={date_from}&date_to={date_to}"
        ))
        .await
    }

    /// Fetches one page of stored rates.
    pub async fn list_rates_page(
        &self,
        source_currency: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedRatesResponse, ClientError> {
        self.get(&format!(
            "/exchange-rates/pagination?source_currency={source_currency}&date_from={date_from}&date_to={date_to}&page={page}&page_size={page_size}"
        ))
        .await
    }

    /// Converts an amount between two currencies at today's rate.
    pub async fn convert(
        &self,
        source_currency: &str,
        exchanged_currency: &str,
        amount: Decimal,
    ) -> Result<ConvertResponse, ClientError> {
        self.get(&format!(
            "/convert?source_currency={source_currency}&exchanged_currency={exchanged_currency}&amount={amount}"
        ))
        .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ingestion
    // ─────────────────────────────────────────────────────────────────────────

    /// Submits a historical backfill and returns the task group handle.
    pub async fn load_historical_rates(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<BackfillResponse, ClientError> {
        let req = BackfillRequest {
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
        };
        self.post("/currency/load-historical-rates", &req).await
    }

    /// Polls the progress of a backfill group.
    pub async fn task_status(&self, id: GroupId) -> Result<GroupStatus, ClientError> {
        self.get(&format!("/tasks/{id}")).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Currency catalog
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a currency.
    pub async fn create_currency(&self, code: &str) -> Result<Currency, ClientError> {
        let req = CreateCurrencyRequest {
            code: code.to_string(),
        };
        self.post("/currencies", &req).await
    }

    /// Lists all registered currencies.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, ClientError> {
        self.get("/currencies").await
    }

    /// Gets a currency by code.
    pub async fn get_currency(&self, code: &str) -> Result<Currency, ClientError> {
        self.get(&format!("/currencies/{code}")).await
    }

    /// Removes a currency from the catalog.
    pub async fn delete_currency(&self, code: &str) -> Result<(), ClientError> {
        self.delete(&format!("/currencies/{code}")).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Provider catalog
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a rate provider.
    pub async fn create_provider(
        &self,
        req: &CreateProviderRequest,
    ) -> Result<Provider, ClientError> {
        self.post("/providers", req).await
    }

    /// Lists providers in resolution order.
    pub async fn list_providers(&self) -> Result<Vec<Provider>, ClientError> {
        self.get("/providers").await
    }

    /// Gets a provider by ID.
    pub async fn get_provider(&self, id: ProviderId) -> Result<Provider, ClientError> {
        self.get(&format!("/providers/{id}")).await
    }

    /// Partially updates a provider.
    pub async fn update_provider(
        &self,
        id: ProviderId,
        req: &UpdateProviderRequest,
    ) -> Result<Provider, ClientError> {
        let resp = self
            .http
            .patch(format!("{}/providers/{id}", self.base_url))
            .json(req)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Deletes a provider.
    pub async fn delete_provider(&self, id: ProviderId) -> Result<(), ClientError> {
        self.delete(&format!("/providers/{id}")).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Plumbing
    // ─────────────────────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.api_error(status, resp).await)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(self.api_error(status, resp).await)
        }
    }

    async fn api_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> ClientError {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
