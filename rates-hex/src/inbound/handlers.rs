//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use rates_types::{
    AppError, BackfillRequest, BackfillResponse, CreateCurrencyRequest, CreateProviderRequest,
    CurrencyCode, GroupId, ProviderId, RateStore, UpdateProviderRequest,
};

use crate::backfill::BackfillService;
use crate::service::RateService;

/// Application state shared across handlers.
pub struct AppState<S: RateStore> {
    pub service: RateService<S>,
    pub backfill: BackfillService,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse().map_err(|_| {
        ApiError(AppError::BadRequest(format!(
            "Invalid date {raw:?}, expected YYYY-MM-DD"
        )))
    })
}

fn parse_code(raw: &str) -> Result<CurrencyCode, ApiError> {
    CurrencyCode::new(raw).map_err(|e| ApiError(AppError::BadRequest(e.to_string())))
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .ok_or_else(|| ApiError(AppError::BadRequest(format!("Missing required parameter: {name}"))))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate queries
// ─────────────────────────────────────────────────────────────────────────────

fn default_source_currency() -> String {
    "EUR".to_string()
}

#[derive(Debug, Deserialize)]
pub struct RatesListQuery {
    #[serde(default = "default_source_currency")]
    pub source_currency: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// List stored rates for a base currency over a date range.
#[tracing::instrument(skip(state))]
pub async fn list_rates<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<RatesListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let base = parse_code(&query.source_currency)?;
    let from = parse_date(require(&query.date_from, "date_from")?)?;
    let to = parse_date(require(&query.date_to, "date_to")?)?;

    let rates = state.service.list_rates(base, from, to).await?;
    Ok(Json(rates))
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct RatesPageQuery {
    #[serde(default = "default_source_currency")]
    pub source_currency: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Paginated rate listing.
#[tracing::instrument(skip(state))]
pub async fn list_rates_page<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<RatesPageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let base = parse_code(&query.source_currency)?;
    let from = parse_date(require(&query.date_from, "date_from")?)?;
    let to = parse_date(require(&query.date_to, "date_to")?)?;

    let page = state
        .service
        .list_rates_page(base, from, to, query.page, query.page_size)
        .await?;
    Ok(Json(page))
}

fn default_exchanged_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    #[serde(default = "default_source_currency")]
    pub source_currency: String,
    #[serde(default = "default_exchanged_currency")]
    pub exchanged_currency: String,
    pub amount: Option<String>,
}

/// Convert an amount between two currencies at today's rate.
#[tracing::instrument(skip(state))]
pub async fn convert<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let source = parse_code(&query.source_currency)?;
    let target = parse_code(&query.exchanged_currency)?;
    let amount = match query.amount.as_deref() {
        Some(raw) => raw.parse::<Decimal>().map_err(|_| {
            ApiError(AppError::BadRequest(format!("Invalid amount {raw:?}")))
        })?,
        None => Decimal::ONE,
    };

    let response = state.service.convert(source, target, amount).await?;
    Ok(Json(response))
}

// ─────────────────────────────────────────────────────────────────────────────
// Ingestion
// ─────────────────────────────────────────────────────────────────────────────

/// Submit a historical backfill over an inclusive date range.
#[tracing::instrument(skip(state))]
pub async fn load_historical_rates<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<BackfillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let start = parse_date(require(&req.start_date, "start_date")?)?;
    let end = parse_date(require(&req.end_date, "end_date")?)?;

    let task_id = state.backfill.backfill(start, end).await?;
    Ok(Json(BackfillResponse {
        message: "Historical rates loading initiated".into(),
        task_id,
    }))
}

/// Poll the progress of a submitted backfill group.
#[tracing::instrument(skip(state), fields(task_id = %id))]
pub async fn task_status<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let group: GroupId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid task ID".into()))?;

    let status = state
        .backfill
        .status(group)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {group}")))?;
    Ok(Json(status))
}

// ─────────────────────────────────────────────────────────────────────────────
// Currency catalog
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(code = %req.code))]
pub async fn create_currency<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateCurrencyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = state.service.register_currency(req).await?;
    Ok((StatusCode::CREATED, Json(currency)))
}

#[tracing::instrument(skip(state))]
pub async fn list_currencies<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.list_currencies().await?;
    Ok(Json(currencies))
}

#[tracing::instrument(skip(state), fields(code = %code))]
pub async fn get_currency<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = state.service.get_currency(&code).await?;
    Ok(Json(currency))
}

#[tracing::instrument(skip(state), fields(code = %code))]
pub async fn delete_currency<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_currency(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider catalog
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(name = %req.name))]
pub async fn create_provider<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateProviderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state.service.create_provider(req).await?;
    Ok((StatusCode::CREATED, Json(provider)))
}

#[tracing::instrument(skip(state))]
pub async fn list_providers<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let providers = state.service.list_providers().await?;
    Ok(Json(providers))
}

fn parse_provider_id(raw: &str) -> Result<ProviderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(AppError::BadRequest("Invalid provider ID".into())))
}

#[tracing::instrument(skip(state), fields(provider_id = %id))]
pub async fn get_provider<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state.service.get_provider(parse_provider_id(&id)?).await?;
    Ok(Json(provider))
}

#[tracing::instrument(skip(state, req), fields(provider_id = %id))]
pub async fn update_provider<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProviderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state
        .service
        .update_provider(parse_provider_id(&id)?, req)
        .await?;
    Ok(Json(provider))
}

#[tracing::instrument(skip(state), fields(provider_id = %id))]
pub async fn delete_provider<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_provider(parse_provider_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
