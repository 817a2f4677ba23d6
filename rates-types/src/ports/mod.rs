//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod provider;
mod queue;
mod store;

pub use provider::{ProviderError, RateProvider};
pub use queue::{
    GroupId, GroupStatus, JobId, JobRunner, JobSpec, JobState, QueueError, TaskQueue,
};
pub use store::RateStore;
