//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use chrono::NaiveTime;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// CurrencyBeacon credential; optional, live providers degrade to
    /// synthetic rates without one
    pub currencybeacon_api_key: Option<String>,
    /// In-flight provider calls per day job
    pub ingest_concurrency: usize,
    /// Queue worker parallelism
    pub queue_workers: usize,
    /// UTC wall-clock time of the daily sync
    pub daily_sync_time: NaiveTime,
    /// Outbound request timeout for live providers
    pub provider_timeout: Duration,
    /// Per-client request quota per minute
    pub rate_limit_per_minute: u32,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = var_or("PORT", "3000").parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let currencybeacon_api_key = env::var("CURRENCYBEACON_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let ingest_concurrency = var_or("INGEST_CONCURRENCY", "16").parse()?;
        let queue_workers = var_or("QUEUE_WORKERS", "4").parse()?;

        let daily_sync_time =
            NaiveTime::parse_from_str(&var_or("DAILY_SYNC_TIME", "00:30"), "%H:%M")?;

        let provider_timeout =
            Duration::from_secs(var_or("PROVIDER_TIMEOUT_SECS", "10").parse()?);

        let rate_limit_per_minute = var_or("RATE_LIMIT_PER_MINUTE", "100").parse()?;

        Ok(Self {
            port,
            database_url,
            currencybeacon_api_key,
            ingest_concurrency,
            queue_workers,
            daily_sync_time,
            provider_timeout,
            rate_limit_per_minute,
        })
    }
}
