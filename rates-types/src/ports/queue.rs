//! Task queue port.
//!
//! The ingestion pipeline submits fetch jobs through this seam and never
//! blocks on their completion; callers get back opaque handles and observe
//! progress through the status queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Unique identifier for a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a group of jobs submitted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GroupId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A unit of work the queue can execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobSpec {
    /// Fetch and store rates for every currency pair on one date
    IngestDay {
        #[schema(value_type = String, example = "2024-03-01")]
        date: NaiveDate,
    },
}

/// Lifecycle state of a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    Completed,
    Failed { error: String },
}

/// Aggregate progress of a job group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupStatus {
    pub total: usize,
    pub queued: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
}

impl GroupStatus {
    /// True once every job in the group reached a terminal state.
    pub fn is_done(&self) -> bool {
        self.completed + self.failed == self.total
    }
}

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Submission failed: {0}")]
    Submit(String),
}

/// Port trait for asynchronous job execution.
#[async_trait::async_trait]
pub trait TaskQueue: Send + Sync + 'static {
    /// Submits a single job. Returns immediately with a handle.
    async fn submit(&self, job: JobSpec) -> Result<JobId, QueueError>;

    /// Submits a batch of independent jobs as one group.
    async fn submit_group(&self, jobs: Vec<JobSpec>) -> Result<GroupId, QueueError>;

    /// Looks up the state of a single job.
    async fn job_status(&self, id: JobId) -> Result<Option<JobState>, QueueError>;

    /// Aggregates the states of a job group.
    async fn group_status(&self, id: GroupId) -> Result<Option<GroupStatus>, QueueError>;
}

/// The execution seam: the queue runs jobs through this trait, keeping the
/// queue itself ignorant of what a job does.
#[async_trait::async_trait]
pub trait JobRunner: Send + Sync + 'static {
    async fn run(&self, job: JobSpec) -> Result<(), AppError>;
}
