//! Service layer unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use rates_providers::ProviderRegistry;
    use rates_types::{
        AppError, CreateCurrencyRequest, CreateProviderRequest, Currency, CurrencyCode,
        ExchangeRate, GroupId, GroupStatus, JobId, JobSpec, JobState, Provider, ProviderError,
        ProviderId, ProviderKind, QueueError, RateProvider, RateStore, StoreError, TaskQueue,
        UpdateProviderRequest,
    };

    use crate::backfill::BackfillService;
    use crate::ingest::IngestService;
    use crate::resolve::RateResolver;
    use crate::service::RateService;

    // ─────────────────────────────────────────────────────────────────────────
    // Test doubles
    // ─────────────────────────────────────────────────────────────────────────

    /// Simple in-memory store for testing the service layer.
    pub struct MockStore {
        currencies: Mutex<BTreeMap<String, Currency>>,
        providers: Mutex<Vec<Provider>>,
        rates: Mutex<BTreeMap<(String, String, NaiveDate), ExchangeRate>>,
        bulk_calls: AtomicUsize,
        fail_bulk_on_call: Option<usize>,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self {
                currencies: Mutex::new(BTreeMap::new()),
                providers: Mutex::new(Vec::new()),
                rates: Mutex::new(BTreeMap::new()),
                bulk_calls: AtomicUsize::new(0),
                fail_bulk_on_call: None,
            }
        }

        /// Makes the nth `bulk_upsert_rates` call (1-based) return an error.
        fn fail_bulk_on_call(mut self, call: usize) -> Self {
            self.fail_bulk_on_call = Some(call);
            self
        }

        fn rate_count(&self) -> usize {
            self.rates.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RateStore for MockStore {
        async fn upsert_currency(&self, code: &CurrencyCode) -> Result<Currency, StoreError> {
            let mut currencies = self.currencies.lock().unwrap();
            let currency = currencies
                .entry(code.as_str().to_string())
                .or_insert_with(|| Currency::new(code.clone()));
            Ok(currency.clone())
        }

        async fn get_currency(&self, code: &CurrencyCode) -> Result<Option<Currency>, StoreError> {
            Ok(self.currencies.lock().unwrap().get(code.as_str()).cloned())
        }

        async fn list_currencies(&self) -> Result<Vec<Currency>, StoreError> {
            Ok(self.currencies.lock().unwrap().values().cloned().collect())
        }

        async fn delete_currency(&self, code: &CurrencyCode) -> Result<bool, StoreError> {
            Ok(self
                .currencies
                .lock()
                .unwrap()
                .remove(code.as_str())
                .is_some())
        }

        async fn create_provider(
            &self,
            req: CreateProviderRequest,
        ) -> Result<Provider, StoreError> {
            let mut providers = self.providers.lock().unwrap();
            if providers.iter().any(|p| p.name == req.name) {
                return Err(StoreError::Conflict(format!(
                    "Provider '{}' already exists",
                    req.name
                )));
            }
            let provider = Provider::new(req.name, req.kind, req.is_active, req.priority)
                .map_err(StoreError::Domain)?;
            providers.push(provider.clone());
            Ok(provider)
        }

        async fn get_provider(&self, id: ProviderId) -> Result<Option<Provider>, StoreError> {
            Ok(self
                .providers
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn list_providers(&self) -> Result<Vec<Provider>, StoreError> {
            let mut providers = self.providers.lock().unwrap().clone();
            providers.sort_by_key(|p| p.priority);
            Ok(providers)
        }

        async fn update_provider(
            &self,
            id: ProviderId,
            req: UpdateProviderRequest,
        ) -> Result<Option<Provider>, StoreError> {
            let mut providers = self.providers.lock().unwrap();
            let Some(provider) = providers.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            if let Some(name) = req.name {
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
            Ok(Some(provider.clone()))
        }

        async fn delete_provider(&self, id: ProviderId) -> Result<bool, StoreError> {
            let mut providers = self.providers.lock().unwrap();
            let before = providers.len();
            providers.retain(|p| p.id != id);
            Ok(providers.len() < before)
        }

        async fn list_active_providers(&self) -> Result<Vec<Provider>, StoreError> {
            let mut providers: Vec<Provider> = self
                .providers
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.is_active)
                .cloned()
                .collect();
            // Stable sort keeps insertion order within equal priorities.
            providers.sort_by_key(|p| p.priority);
            Ok(providers)
        }

        async fn bulk_upsert_rates(&self, rows: &[ExchangeRate]) -> Result<u64, StoreError> {
            let call = self.bulk_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_bulk_on_call == Some(call) {
                return Err(StoreError::Database("simulated write failure".into()));
            }
            let mut rates = self.rates.lock().unwrap();
            let mut inserted = 0u64;
            for row in rows {
                let key = (
                    row.base_currency.as_str().to_string(),
                    row.target_currency.as_str().to_string(),
                    row.date,
                );
                if !rates.contains_key(&key) {
                    rates.insert(key, row.clone());
                    inserted += 1;
                }
            }
            Ok(inserted)
        }

        async fn query_rates(
            &self,
            base: &CurrencyCode,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Result<Vec<ExchangeRate>, StoreError> {
            let mut rows: Vec<ExchangeRate> = self
                .rates
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.base_currency == *base && r.date >= from && r.date <= to)
                .cloned()
                .collect();
            rows.sort_by(|a, b| {
                (a.date, a.target_currency.as_str()).cmp(&(b.date, b.target_currency.as_str()))
            });
            Ok(rows)
        }

        async fn query_rates_page(
            &self,
            base: &CurrencyCode,
            from: NaiveDate,
            to: NaiveDate,
            limit: i64,
            offset: i64,
        ) -> Result<(Vec<ExchangeRate>, i64), StoreError> {
            let rows = self.query_rates(base, from, to).await?;
            let total = rows.len() as i64;
            let page = rows
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect();
            Ok((page, total))
        }
    }

    /// Provider that returns a scripted outcome and counts invocations.
    struct ScriptedProvider {
        outcome: Result<Decimal, String>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn returning(rate: Decimal) -> Arc<Self> {
            Arc::new(Self {
                outcome: Ok(rate),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                outcome: Err(reason.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for ScriptedProvider {
        async fn fetch_rate(
            &self,
            _base: &CurrencyCode,
            _target: &CurrencyCode,
            _date: NaiveDate,
        ) -> Result<Decimal, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone().map_err(ProviderError::Unavailable)
        }
    }

    /// Queue that records submissions without running anything.
    struct RecordingQueue {
        submitted: Mutex<Vec<JobSpec>>,
    }

    impl RecordingQueue {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                submitted: Mutex::new(Vec::new()),
            })
        }

        fn jobs(&self) -> Vec<JobSpec> {
            self.submitted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TaskQueue for RecordingQueue {
        async fn submit(&self, job: JobSpec) -> Result<JobId, QueueError> {
            self.submitted.lock().unwrap().push(job);
            Ok(JobId::new())
        }

        async fn submit_group(&self, jobs: Vec<JobSpec>) -> Result<GroupId, QueueError> {
            self.submitted.lock().unwrap().extend(jobs);
            Ok(GroupId::new())
        }

        async fn job_status(&self, _id: JobId) -> Result<Option<JobState>, QueueError> {
            Ok(None)
        }

        async fn group_status(&self, _id: GroupId) -> Result<Option<GroupStatus>, QueueError> {
            Ok(None)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fixtures
    // ─────────────────────────────────────────────────────────────────────────

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn store_with_currencies(codes: &[&str]) -> Arc<MockStore> {
        let store = Arc::new(MockStore::new());
        for c in codes {
            store.upsert_currency(&code(c)).await.unwrap();
        }
        store
    }

    async fn add_provider(
        store: &MockStore,
        name: &str,
        kind: ProviderKind,
        is_active: bool,
        priority: i32,
    ) {
        store
            .create_provider(CreateProviderRequest {
                name: name.to_string(),
                kind,
                is_active,
                priority,
            })
            .await
            .unwrap();
    }

    fn registry(
        beacon: &Arc<ScriptedProvider>,
        synthetic: &Arc<ScriptedProvider>,
    ) -> ProviderRegistry {
        ProviderRegistry::from_parts(beacon.clone(), synthetic.clone())
    }

    fn assert_bad_request(result: Result<impl std::fmt::Debug, AppError>) {
        match result {
            Err(AppError::BadRequest(_)) => {}
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Provider fallback
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fallback_returns_first_success() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "beacon", ProviderKind::CurrencyBeacon, true, 1).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 2).await;

        let beacon = ScriptedProvider::failing("upstream down");
        let synthetic = ScriptedProvider::returning(dec!(1.25));
        let resolver = RateResolver::new(store, registry(&beacon, &synthetic));

        let rate = resolver
            .resolve(&code("EUR"), &code("USD"), date("2024-03-01"))
            .await
            .unwrap();

        assert_eq!(rate, Some(dec!(1.25)));
        assert_eq!(beacon.calls(), 1);
        assert_eq!(synthetic.calls(), 1);
    }

    #[tokio::test]
    async fn test_first_provider_success_short_circuits() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "beacon", ProviderKind::CurrencyBeacon, true, 1).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 2).await;

        let beacon = ScriptedProvider::returning(dec!(1.10));
        let synthetic = ScriptedProvider::returning(dec!(9.99));
        let resolver = RateResolver::new(store, registry(&beacon, &synthetic));

        let rate = resolver
            .resolve(&code("EUR"), &code("USD"), date("2024-03-01"))
            .await
            .unwrap();

        assert_eq!(rate, Some(dec!(1.10)));
        assert_eq!(synthetic.calls(), 0);
    }

    #[tokio::test]
    async fn test_inactive_provider_never_called() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "beacon", ProviderKind::CurrencyBeacon, false, 1).await;

        let beacon = ScriptedProvider::returning(dec!(1.10));
        let synthetic = ScriptedProvider::returning(dec!(1.10));
        let resolver = RateResolver::new(store, registry(&beacon, &synthetic));

        let rate = resolver
            .resolve(&code("EUR"), &code("USD"), date("2024-03-01"))
            .await
            .unwrap();

        assert_eq!(rate, None);
        assert_eq!(beacon.calls(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_chain_yields_none() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "beacon", ProviderKind::CurrencyBeacon, true, 1).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 2).await;

        let beacon = ScriptedProvider::failing("upstream down");
        let synthetic = ScriptedProvider::failing("also down");
        let resolver = RateResolver::new(store, registry(&beacon, &synthetic));

        let rate = resolver
            .resolve(&code("EUR"), &code("USD"), date("2024-03-01"))
            .await
            .unwrap();

        assert_eq!(rate, None);
        assert_eq!(beacon.calls(), 1);
        assert_eq!(synthetic.calls(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ingestion
    // ─────────────────────────────────────────────────────────────────────────

    fn ingest_service(
        store: Arc<MockStore>,
        beacon: &Arc<ScriptedProvider>,
        synthetic: &Arc<ScriptedProvider>,
    ) -> IngestService<MockStore> {
        let resolver = RateResolver::new(store.clone(), registry(beacon, synthetic));
        IngestService::new(store, resolver)
    }

    #[tokio::test]
    async fn test_ingest_day_covers_the_full_pair_matrix() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::returning(dec!(1.25));
        let service = ingest_service(store.clone(), &beacon, &synthetic);

        let summary = service.ingest_day(date("2024-03-01")).await.unwrap();

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.stored, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(store.rate_count(), 2);

        // Both directions of the pair land, never the identity pair.
        let rows = store
            .query_rates(&code("EUR"), date("2024-03-01"), date("2024-03-01"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target_currency, code("USD"));
    }

    #[tokio::test]
    async fn test_ingest_day_counts_unserved_pairs_without_failing() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("down");
        let service = ingest_service(store.clone(), &beacon, &synthetic);

        let summary = service.ingest_day(date("2024-03-01")).await.unwrap();

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.stored, 0);
        assert_eq!(summary.failed, 2);
        assert_eq!(store.rate_count(), 0);
    }

    #[tokio::test]
    async fn test_ingest_day_is_idempotent() {
        let store = store_with_currencies(&["EUR", "USD", "GBP"]).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::returning(dec!(1.25));
        let service = ingest_service(store.clone(), &beacon, &synthetic);

        let first = service.ingest_day(date("2024-03-01")).await.unwrap();
        assert_eq!(first.stored, 6);

        let second = service.ingest_day(date("2024-03-01")).await.unwrap();
        assert_eq!(second.attempted, 6);
        assert_eq!(second.stored, 0, "existing rows are skipped, not rewritten");
        assert_eq!(store.rate_count(), 6);
    }

    #[tokio::test]
    async fn test_batch_failure_keeps_earlier_batches() {
        let store = Arc::new(MockStore::new().fail_bulk_on_call(2));
        for c in ["EUR", "USD", "GBP"] {
            store.upsert_currency(&code(c)).await.unwrap();
        }
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::returning(dec!(1.25));
        let resolver = RateResolver::new(store.clone(), registry(&beacon, &synthetic));
        // 6 pairs in batches of 4: the second write fails after the first commits.
        let service = IngestService::new(store.clone(), resolver).with_batch_size(4);

        let result = service.ingest_day(date("2024-03-01")).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(store.rate_count(), 4, "the committed batch stays persisted");
    }

    #[tokio::test]
    async fn test_ingest_day_with_no_currencies_is_empty() {
        let store = store_with_currencies(&[]).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::returning(dec!(1.25));
        let service = ingest_service(store, &beacon, &synthetic);

        let summary = service.ingest_day(date("2024-03-01")).await.unwrap();

        assert_eq!(summary.attempted, 0);
        assert_eq!(summary.stored, 0);
        assert_eq!(summary.failed, 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Backfill decomposition
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_backfill_submits_one_job_per_day() {
        let queue = RecordingQueue::new();
        let backfill = BackfillService::new(queue.clone());

        backfill
            .backfill(date("2024-01-01"), date("2024-01-03"))
            .await
            .unwrap();

        let jobs = queue.jobs();
        assert_eq!(
            jobs,
            vec![
                JobSpec::IngestDay { date: date("2024-01-01") },
                JobSpec::IngestDay { date: date("2024-01-02") },
                JobSpec::IngestDay { date: date("2024-01-03") },
            ]
        );
    }

    #[tokio::test]
    async fn test_backfill_single_day_range() {
        let queue = RecordingQueue::new();
        let backfill = BackfillService::new(queue.clone());

        backfill
            .backfill(date("2024-01-01"), date("2024-01-01"))
            .await
            .unwrap();

        assert_eq!(
            queue.jobs(),
            vec![JobSpec::IngestDay { date: date("2024-01-01") }]
        );
    }

    #[tokio::test]
    async fn test_backfill_rejects_inverted_range_before_submission() {
        let queue = RecordingQueue::new();
        let backfill = BackfillService::new(queue.clone());

        let result = backfill.backfill(date("2024-01-03"), date("2024-01-01")).await;

        assert_bad_request(result);
        assert!(queue.jobs().is_empty(), "nothing reaches the queue");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────

    fn rate_service(
        store: Arc<MockStore>,
        beacon: &Arc<ScriptedProvider>,
        synthetic: &Arc<ScriptedProvider>,
    ) -> RateService<MockStore> {
        let resolver = RateResolver::new(store.clone(), registry(beacon, synthetic));
        RateService::new(store, resolver)
    }

    #[tokio::test]
    async fn test_convert_uses_resolved_rate() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::returning(dec!(1.25));
        let service = rate_service(store, &beacon, &synthetic);

        let response = service
            .convert(code("EUR"), code("USD"), dec!(100))
            .await
            .unwrap();

        assert_eq!(response.source_currency, code("EUR"));
        assert_eq!(response.exchanged_currency, code("USD"));
        assert_eq!(response.rate, dec!(1.25));
        assert_eq!(response.converted_amount, dec!(125));
    }

    #[tokio::test]
    async fn test_convert_rejects_bad_input() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::returning(dec!(1.25));
        let service = rate_service(store, &beacon, &synthetic);

        assert_bad_request(service.convert(code("EUR"), code("USD"), dec!(0)).await);
        assert_bad_request(service.convert(code("EUR"), code("EUR"), dec!(1)).await);
        assert_bad_request(service.convert(code("EUR"), code("JPY"), dec!(1)).await);
    }

    #[tokio::test]
    async fn test_convert_without_any_rate_is_not_found() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        add_provider(&store, "mock", ProviderKind::Synthetic, true, 1).await;

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("down");
        let service = rate_service(store, &beacon, &synthetic);

        let result = service.convert(code("EUR"), code("USD"), dec!(1)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rate queries
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_rates_requires_known_currency() {
        let store = store_with_currencies(&["EUR"]).await;
        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        assert_bad_request(
            service
                .list_rates(code("JPY"), date("2024-03-01"), date("2024-03-02"))
                .await,
        );
    }

    #[tokio::test]
    async fn test_list_rates_empty_result_is_not_found() {
        let store = store_with_currencies(&["EUR"]).await;
        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        let result = service
            .list_rates(code("EUR"), date("2024-03-01"), date("2024-03-02"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_rates_rejects_inverted_range() {
        let store = store_with_currencies(&["EUR"]).await;
        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        assert_bad_request(
            service
                .list_rates(code("EUR"), date("2024-03-02"), date("2024-03-01"))
                .await,
        );
    }

    #[tokio::test]
    async fn test_paginated_listing_envelope() {
        let store = store_with_currencies(&["EUR", "USD"]).await;
        let rows: Vec<ExchangeRate> = (1..=5)
            .map(|day| {
                ExchangeRate::new(
                    code("EUR"),
                    code("USD"),
                    dec!(1.1),
                    date(&format!("2024-03-{day:02}")),
                )
                .unwrap()
            })
            .collect();
        store.bulk_upsert_rates(&rows).await.unwrap();

        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        let page = service
            .list_rates_page(code("EUR"), date("2024-03-01"), date("2024-03-05"), 2, 2)
            .await
            .unwrap();

        assert_eq!(page.count, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].date, date("2024-03-03"));

        // Walking past the last page is a valid, empty answer.
        let past = service
            .list_rates_page(code("EUR"), date("2024-03-01"), date("2024-03-05"), 9, 2)
            .await
            .unwrap();
        assert!(past.results.is_empty());
        assert_eq!(past.count, 5);
    }

    #[tokio::test]
    async fn test_pagination_validates_inputs() {
        let store = store_with_currencies(&["EUR"]).await;
        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        assert_bad_request(
            service
                .list_rates_page(code("EUR"), date("2024-03-01"), date("2024-03-05"), 0, 10)
                .await,
        );
        assert_bad_request(
            service
                .list_rates_page(code("EUR"), date("2024-03-01"), date("2024-03-05"), 1, 0)
                .await,
        );
        assert_bad_request(
            service
                .list_rates_page(code("EUR"), date("2024-03-01"), date("2024-03-05"), 1, 101)
                .await,
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Catalogs
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_register_currency_validates_code() {
        let store = store_with_currencies(&[]).await;
        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        let currency = service
            .register_currency(CreateCurrencyRequest { code: "eur".into() })
            .await
            .unwrap();
        assert_eq!(currency.code, code("EUR"), "codes are normalized upper-case");

        assert_bad_request(
            service
                .register_currency(CreateCurrencyRequest { code: "EURO".into() })
                .await,
        );
    }

    #[tokio::test]
    async fn test_delete_missing_currency_is_not_found() {
        let store = store_with_currencies(&[]).await;
        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        let result = service.delete_currency("EUR").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_provider_crud_through_service() {
        let store = store_with_currencies(&[]).await;
        let beacon = ScriptedProvider::failing("unused");
        let synthetic = ScriptedProvider::failing("unused");
        let service = rate_service(store, &beacon, &synthetic);

        let created = service
            .create_provider(CreateProviderRequest {
                name: "mock".into(),
                kind: ProviderKind::Synthetic,
                is_active: true,
                priority: 1,
            })
            .await
            .unwrap();

        let updated = service
            .update_provider(
                created.id,
                UpdateProviderRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_active);

        service.delete_provider(created.id).await.unwrap();
        let result = service.get_provider(created.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let missing = service.delete_provider(ProviderId::new()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
