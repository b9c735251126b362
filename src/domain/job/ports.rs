use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::entities::{Job, JobChanges};
use super::value_objects::JobId;
use crate::domain::auth::UserId;
use crate::domain::errors::RepositoryError;

/// Repository trait for job persistence
///
/// Every read and mutation is scoped by owner inside the store predicate;
/// a job belonging to someone else behaves exactly like a missing one.
#[async_trait]
pub trait JobRepository: Send + Sync {
  /// All jobs of `owner`, most recently updated first
  async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Job>, RepositoryError>;

  async fn insert(&self, job: Job) -> Result<Job, RepositoryError>;

  /// Applies `changes` to the job matching both `owner` and `id`.
  /// Returns whether a job matched.
  async fn update_for_owner(
    &self,
    owner: UserId,
    id: &JobId,
    changes: &JobChanges,
    now: DateTime<Utc>,
  ) -> Result<bool, RepositoryError>;

  /// Deletes the job matching both `owner` and `id`. Returns whether one matched.
  async fn delete_for_owner(&self, owner: UserId, id: &JobId) -> Result<bool, RepositoryError>;
}
