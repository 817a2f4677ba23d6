//! # Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Build the provider registry and services
//! - Start the queue, the daily scheduler and the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_hex::{
    BackfillService, DailyScheduler, IngestService, InProcessQueue, RateResolver, RateService,
    inbound::HttpServer,
};
use rates_providers::{ProviderRegistry, RegistryConfig};
use rates_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting rates server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let store = Arc::new(build_repo(&config.database_url).await?);

    // Provider registry and fallback chain
    let registry = ProviderRegistry::new(RegistryConfig {
        currencybeacon_api_key: config.currencybeacon_api_key.clone(),
        provider_timeout: config.provider_timeout,
        synthetic_seed: None,
    })?;
    let resolver = RateResolver::new(store.clone(), registry);

    // Ingestion pipeline: day jobs run through the in-process queue
    let ingest = Arc::new(
        IngestService::new(store.clone(), resolver.clone())
            .with_concurrency(config.ingest_concurrency),
    );
    let queue = Arc::new(InProcessQueue::new(ingest, config.queue_workers));
    let backfill = BackfillService::new(queue);

    // Daily sync (yesterday + today) at the configured UTC time
    DailyScheduler::new(backfill.clone(), config.daily_sync_time).spawn();

    // Create and run the HTTP server
    let service = RateService::new(store, resolver);
    let server = HttpServer::with_rate_limit(service, backfill, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
