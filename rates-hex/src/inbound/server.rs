//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rates_types::RateStore;

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::backfill::BackfillService;
use crate::openapi::ApiDoc;
use crate::service::RateService;

/// HTTP Server for the FX rates API.
pub struct HttpServer<S: RateStore> {
    state: Arc<AppState<S>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<S: RateStore> HttpServer<S> {
    /// Creates a new HTTP server with the given services.
    pub fn new(service: RateService<S>, backfill: BackfillService) -> Self {
        Self {
            state: Arc::new(AppState { service, backfill }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(
        service: RateService<S>,
        backfill: BackfillService,
        requests_per_minute: u32,
    ) -> Self {
        use std::time::Duration;
        Self {
            state: Arc::new(AppState { service, backfill }),
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/currency-rates/list", get(handlers::list_rates::<S>))
            .route(
                "/exchange-rates/pagination",
                get(handlers::list_rates_page::<S>),
            )
            .route("/convert", get(handlers::convert::<S>))
            .route(
                "/currency/load-historical-rates",
                post(handlers::load_historical_rates::<S>),
            )
            .route("/tasks/{id}", get(handlers::task_status::<S>))
            .route("/currencies", post(handlers::create_currency::<S>))
            .route("/currencies", get(handlers::list_currencies::<S>))
            .route("/currencies/{code}", get(handlers::get_currency::<S>))
            .route("/currencies/{code}", axum::routing::delete(handlers::delete_currency::<S>))
            .route("/providers", post(handlers::create_provider::<S>))
            .route("/providers", get(handlers::list_providers::<S>))
            .route("/providers/{id}", get(handlers::get_provider::<S>))
            .route("/providers/{id}", axum::routing::patch(handlers::update_provider::<S>))
            .route("/providers/{id}", axum::routing::delete(handlers::delete_provider::<S>))
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
