//! # Rates Hex
//!
//! Application service layer, ingestion pipeline and HTTP adapter for the
//! FX rates service.
//!
//! ## Architecture
//!
//! - `service` - rate queries, conversion, currency/provider catalogs
//! - `resolve` - provider fallback chain
//! - `ingest` - single-day ingestion orchestrator
//! - `backfill` - historical range decomposition into day jobs
//! - `queue` - in-process background job queue
//! - `scheduler` - daily sync trigger
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Services are generic over `S: RateStore`, so storage adapters are
//! injected at compile time.

pub mod backfill;
pub mod inbound;
pub mod ingest;
pub mod openapi;
pub mod queue;
pub mod resolve;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use backfill::BackfillService;
pub use ingest::IngestService;
pub use queue::InProcessQueue;
pub use resolve::RateResolver;
pub use scheduler::DailyScheduler;
pub use service::RateService;
