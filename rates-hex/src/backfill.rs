//! Historical backfill.
//!
//! Decomposes an inclusive date range into independent day jobs and submits
//! them as one group, so a bad day fails alone and the rest of the range
//! still completes.

use std::sync::Arc;

use chrono::NaiveDate;

use rates_types::{AppError, DomainError, GroupId, GroupStatus, JobSpec, TaskQueue};

/// Submits historical ranges to the task queue as day-job groups.
#[derive(Clone)]
pub struct BackfillService {
    queue: Arc<dyn TaskQueue>,
}

impl BackfillService {
    pub fn new(queue: Arc<dyn TaskQueue>) -> Self {
        Self { queue }
    }

    /// Validates the range, enumerates every date from `start` through `end`
    /// inclusive, and submits one ingestion job per date. Returns the group
    /// handle immediately without waiting for any job to run.
    pub async fn backfill(&self, start: NaiveDate, end: NaiveDate) -> Result<GroupId, AppError> {
        if start > end {
            return Err(DomainError::InvalidDateRange { start, end }.into());
        }

        let jobs: Vec<JobSpec> = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| JobSpec::IngestDay { date })
            .collect();
        let days = jobs.len();

        let group = self.queue.submit_group(jobs).await?;
        tracing::info!(%start, %end, days, %group, "backfill submitted");
        Ok(group)
    }

    /// Aggregate progress of a previously submitted group.
    pub async fn status(&self, id: GroupId) -> Result<Option<GroupStatus>, AppError> {
        Ok(self.queue.group_status(id).await?)
    }
}
