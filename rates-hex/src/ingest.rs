//! Single-day rate ingestion.
//!
//! Builds the full ordered-pair matrix over the registered currencies,
//! resolves each pair through the provider chain under a concurrency cap,
//! and persists the results in batches with insert-or-skip semantics.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use rates_types::{
    AppError, CurrencyCode, ExchangeRate, IngestSummary, JobRunner, JobSpec, RateStore,
};

use crate::resolve::RateResolver;

/// Upper bound on in-flight provider calls per day job.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Rows per bulk insert statement.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Orchestrates one day of rate ingestion.
pub struct IngestService<S: RateStore> {
    store: Arc<S>,
    resolver: RateResolver<S>,
    concurrency: usize,
    batch_size: usize,
}

impl<S: RateStore> IngestService<S> {
    pub fn new(store: Arc<S>, resolver: RateResolver<S>) -> Self {
        Self {
            store,
            resolver,
            concurrency: DEFAULT_CONCURRENCY,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Overrides the provider-call concurrency cap (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Overrides the rows-per-insert batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Ingests rates for every ordered pair of registered currencies on the
    /// given date.
    ///
    /// Pairs no provider can serve are counted as failed but never abort the
    /// run. Persisted rows use insert-or-skip semantics, so re-running a day
    /// neither errors nor overwrites what an earlier run stored. A storage
    /// failure mid-run fails the job; batches committed before it stay
    /// persisted, and the retry skips them.
    #[tracing::instrument(skip(self))]
    pub async fn ingest_day(&self, date: NaiveDate) -> Result<IngestSummary, AppError> {
        let codes: Vec<CurrencyCode> = self
            .store
            .list_currencies()
            .await?
            .into_iter()
            .map(|c| c.code)
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut attempted = 0usize;

        for base in &codes {
            for target in &codes {
                if base == target {
                    continue;
                }
                attempted += 1;

                let resolver = self.resolver.clone();
                let semaphore = semaphore.clone();
                let (base, target) = (base.clone(), target.clone());
                tasks.spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => {
                            let err = AppError::Internal("ingest semaphore closed".into());
                            return (base, target, Err(err));
                        }
                    };
                    let outcome = resolver.resolve(&base, &target, date).await;
                    (base, target, outcome)
                });
            }
        }

        let mut rows = Vec::with_capacity(attempted);
        while let Some(joined) = tasks.join_next().await {
            let (base, target, outcome) =
                joined.map_err(|e| AppError::Internal(format!("ingest task failed: {e}")))?;
            match outcome {
                Ok(Some(rate)) => match ExchangeRate::new(base, target, rate, date) {
                    Ok(row) => rows.push(row),
                    Err(e) => {
                        tracing::warn!(error = %e, %date, "provider returned an unusable rate");
                    }
                },
                Ok(None) => {}
                // Loading the provider list hit the database; fail the day.
                Err(e) => return Err(e),
            }
        }

        let resolved = rows.len();
        let mut stored = 0u64;
        for batch in rows.chunks(self.batch_size) {
            stored += self.store.bulk_upsert_rates(batch).await?;
        }

        let summary = IngestSummary {
            attempted,
            stored: stored as usize,
            failed: attempted - resolved,
        };
        tracing::info!(
            %date,
            attempted = summary.attempted,
            stored = summary.stored,
            failed = summary.failed,
            "day ingested"
        );
        Ok(summary)
    }
}

#[async_trait]
impl<S: RateStore> JobRunner for IngestService<S> {
    async fn run(&self, job: JobSpec) -> Result<(), AppError> {
        match job {
            JobSpec::IngestDay { date } => self.ingest_day(date).await.map(|_| ()),
        }
    }
}
