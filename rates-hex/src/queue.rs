//! In-process task queue.
//!
//! Jobs run on the tokio runtime under a worker-count semaphore; state lives
//! in process memory. The queue knows nothing about what a job does, it just
//! drives the injected `JobRunner` and records lifecycle transitions.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Semaphore;

use rates_types::{
    GroupId, GroupStatus, JobId, JobRunner, JobSpec, JobState, QueueError, TaskQueue,
};

/// Tokio-backed queue with bounded worker parallelism.
pub struct InProcessQueue {
    runner: Arc<dyn JobRunner>,
    workers: Arc<Semaphore>,
    jobs: Arc<DashMap<JobId, JobState>>,
    groups: Arc<DashMap<GroupId, Vec<JobId>>>,
}

impl InProcessQueue {
    /// Creates a queue executing at most `workers` jobs at once (minimum 1).
    pub fn new(runner: Arc<dyn JobRunner>, workers: usize) -> Self {
        Self {
            runner,
            workers: Arc::new(Semaphore::new(workers.max(1))),
            jobs: Arc::new(DashMap::new()),
            groups: Arc::new(DashMap::new()),
        }
    }

    fn spawn_job(&self, id: JobId, job: JobSpec) {
        self.jobs.insert(id, JobState::Queued);

        let runner = self.runner.clone();
        let workers = self.workers.clone();
        let jobs = self.jobs.clone();
        tokio::spawn(async move {
            let _permit = match workers.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    jobs.insert(id, JobState::Failed {
                        error: "queue shut down before the job started".into(),
                    });
                    return;
                }
            };
            jobs.insert(id, JobState::Running);

            match runner.run(job.clone()).await {
                Ok(()) => {
                    jobs.insert(id, JobState::Completed);
                }
                Err(e) => {
                    tracing::error!(%id, ?job, error = %e, "job failed");
                    jobs.insert(id, JobState::Failed {
                        error: e.to_string(),
                    });
                }
            }
        });
    }
}

#[async_trait]
impl TaskQueue for InProcessQueue {
    async fn submit(&self, job: JobSpec) -> Result<JobId, QueueError> {
        let id = JobId::new();
        self.spawn_job(id, job);
        Ok(id)
    }

    async fn submit_group(&self, specs: Vec<JobSpec>) -> Result<GroupId, QueueError> {
        let group = GroupId::new();
        let mut ids = Vec::with_capacity(specs.len());

        for spec in specs {
            let id = JobId::new();
            self.spawn_job(id, spec);
            ids.push(id);
        }

        self.groups.insert(group, ids);
        Ok(group)
    }

    async fn job_status(&self, id: JobId) -> Result<Option<JobState>, QueueError> {
        Ok(self.jobs.get(&id).map(|state| state.clone()))
    }

    async fn group_status(&self, id: GroupId) -> Result<Option<GroupStatus>, QueueError> {
        let Some(ids) = self.groups.get(&id) else {
            return Ok(None);
        };

        let mut status = GroupStatus {
            total: ids.len(),
            queued: 0,
            running: 0,
            completed: 0,
            failed: 0,
        };
        for job_id in ids.iter() {
            match self.jobs.get(job_id).map(|state| state.clone()) {
                Some(JobState::Running) => status.running += 1,
                Some(JobState::Completed) => status.completed += 1,
                Some(JobState::Failed { .. }) => status.failed += 1,
                // Not yet picked up (or unknown): still queued from the caller's view.
                Some(JobState::Queued) | None => status.queued += 1,
            }
        }

        Ok(Some(status))
    }
}
