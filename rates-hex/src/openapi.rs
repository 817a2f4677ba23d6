//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::{
    BackfillRequest, BackfillResponse, ConvertResponse, CreateCurrencyRequest,
    CreateProviderRequest, Currency, CurrencyCode, ExchangeRate, GroupId, GroupStatus,
    PaginatedRatesResponse, Provider, ProviderId, ProviderKind, UpdateProviderRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List stored rates for a base currency over a date range
#[utoipa::path(
    get,
    path = "/currency-rates/list",
    tag = "rates",
    params(
        ("source_currency" = Option<String>, Query, description = "Base currency code (default EUR)"),
        ("date_from" = String, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("date_to" = String, Query, description = "Inclusive end date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Matching rates, ordered by date", body = Vec<ExchangeRate>),
        (status = 400, description = "Missing or invalid parameters"),
        (status = 404, description = "No rates match the criteria")
    )
)]
async fn list_rates() {}

/// Paginated rate listing
#[utoipa::path(
    get,
    path = "/exchange-rates/pagination",
    tag = "rates",
    params(
        ("source_currency" = Option<String>, Query, description = "Base currency code (default EUR)"),
        ("date_from" = String, Query, description = "Inclusive start date (YYYY-MM-DD)"),
        ("date_to" = String, Query, description = "Inclusive end date (YYYY-MM-DD)"),
        ("page" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("page_size" = Option<u32>, Query, description = "Rows per page (default 10, max 100)")
    ),
    responses(
        (status = 200, description = "One page of rates", body = PaginatedRatesResponse),
        (status = 400, description = "Missing or invalid parameters")
    )
)]
async fn list_rates_page() {}

/// Convert an amount between two currencies at today's rate
#[utoipa::path(
    get,
    path = "/convert",
    tag = "rates",
    params(
        ("source_currency" = Option<String>, Query, description = "Source currency code (default EUR)"),
        ("exchanged_currency" = Option<String>, Query, description = "Target currency code (default USD)"),
        ("amount" = Option<String>, Query, description = "Amount to convert (default 1)")
    ),
    responses(
        (status = 200, description = "Conversion result", body = ConvertResponse),
        (status = 400, description = "Invalid currency or amount"),
        (status = 404, description = "No provider could supply a rate")
    )
)]
async fn convert() {}

/// Submit a historical backfill
#[utoipa::path(
    post,
    path = "/currency/load-historical-rates",
    tag = "ingestion",
    request_body = BackfillRequest,
    responses(
        (status = 200, description = "Backfill submitted", body = BackfillResponse),
        (status = 400, description = "Missing or invalid dates, or start after end")
    )
)]
async fn load_historical_rates() {}

/// Poll backfill progress
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "ingestion",
    params(
        ("id" = String, Path, description = "Task group ID (UUID)")
    ),
    responses(
        (status = 200, description = "Aggregate group progress", body = GroupStatus),
        (status = 404, description = "Unknown task ID")
    )
)]
async fn task_status() {}

/// Register a currency
#[utoipa::path(
    post,
    path = "/currencies",
    tag = "currencies",
    request_body = CreateCurrencyRequest,
    responses(
        (status = 201, description = "Currency registered", body = Currency),
        (status = 400, description = "Invalid currency code")
    )
)]
async fn create_currency() {}

/// List registered currencies
#[utoipa::path(
    get,
    path = "/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "All registered currencies", body = Vec<Currency>)
    )
)]
async fn list_currencies() {}

/// Get a currency by code
#[utoipa::path(
    get,
    path = "/currencies/{code}",
    tag = "currencies",
    params(
        ("code" = String, Path, description = "Three-letter currency code")
    ),
    responses(
        (status = 200, description = "Currency record", body = Currency),
        (status = 404, description = "Currency not registered")
    )
)]
async fn get_currency() {}

/// Remove a currency from the catalog
#[utoipa::path(
    delete,
    path = "/currencies/{code}",
    tag = "currencies",
    params(
        ("code" = String, Path, description = "Three-letter currency code")
    ),
    responses(
        (status = 204, description = "Currency deleted"),
        (status = 404, description = "Currency not registered")
    )
)]
async fn delete_currency() {}

/// Register a rate provider
#[utoipa::path(
    post,
    path = "/providers",
    tag = "providers",
    request_body = CreateProviderRequest,
    responses(
        (status = 201, description = "Provider registered", body = Provider),
        (status = 400, description = "Invalid request or duplicate name")
    )
)]
async fn create_provider() {}

/// List providers in resolution order
#[utoipa::path(
    get,
    path = "/providers",
    tag = "providers",
    responses(
        (status = 200, description = "All providers ordered by priority", body = Vec<Provider>)
    )
)]
async fn list_providers() {}

/// Get a provider by ID
#[utoipa::path(
    get,
    path = "/providers/{id}",
    tag = "providers",
    params(
        ("id" = String, Path, description = "Provider ID (UUID)")
    ),
    responses(
        (status = 200, description = "Provider record", body = Provider),
        (status = 404, description = "Provider not found")
    )
)]
async fn get_provider() {}

/// Partially update a provider
#[utoipa::path(
    patch,
    path = "/providers/{id}",
    tag = "providers",
    params(
        ("id" = String, Path, description = "Provider ID (UUID)")
    ),
    request_body = UpdateProviderRequest,
    responses(
        (status = 200, description = "Updated provider", body = Provider),
        (status = 400, description = "Invalid update"),
        (status = 404, description = "Provider not found")
    )
)]
async fn update_provider() {}

/// Delete a provider
#[utoipa::path(
    delete,
    path = "/providers/{id}",
    tag = "providers",
    params(
        ("id" = String, Path, description = "Provider ID (UUID)")
    ),
    responses(
        (status = 204, description = "Provider deleted"),
        (status = 404, description = "Provider not found")
    )
)]
async fn delete_provider() {}

/// OpenAPI document for the FX rates service.
#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_rates,
        list_rates_page,
        convert,
        load_historical_rates,
        task_status,
        create_currency,
        list_currencies,
        get_currency,
        delete_currency,
        create_provider,
        list_providers,
        get_provider,
        update_provider,
        delete_provider,
    ),
    components(schemas(
        CurrencyCode,
        Currency,
        ExchangeRate,
        ProviderId,
        ProviderKind,
        Provider,
        CreateCurrencyRequest,
        CreateProviderRequest,
        UpdateProviderRequest,
        PaginatedRatesResponse,
        ConvertResponse,
        BackfillRequest,
        BackfillResponse,
        GroupId,
        GroupStatus,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "rates", description = "Rate queries and conversion"),
        (name = "ingestion", description = "Historical backfill and task progress"),
        (name = "currencies", description = "Currency catalog"),
        (name = "providers", description = "Provider catalog")
    ),
    info(
        title = "FX Rates Service API",
        description = "Exchange rate storage, conversion and provider-fallback ingestion",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
