use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::auth::{
  entities::User,
  ports::UserRepository,
  value_objects::{Email, UserId},
};
use crate::domain::errors::RepositoryError;
use crate::domain::job::{Job, JobChanges, JobId, JobRepository};

/// Bounds a single store call; an elapsed deadline becomes `RepositoryError::Timeout`
async fn bounded<T>(
  limit: Duration,
  operation: &'static str,
  call: impl Future<Output = Result<T, RepositoryError>>,
) -> Result<T, RepositoryError> {
  match tokio::time::timeout(limit, call).await {
    Ok(result) => result,
    Err(_) => {
      tracing::warn!(operation, timeout_ms = limit.as_millis() as u64, "store call timed out");
      Err(RepositoryError::Timeout(format!(
        "{} exceeded {:?}",
        operation, limit
      )))
    }
  }
}

/// Wraps any user store with a per-call deadline
pub struct TimeoutUserRepository {
  inner: Arc<dyn UserRepository>,
  limit: Duration,
}

impl TimeoutUserRepository {
  pub fn new(inner: Arc<dyn UserRepository>, limit: Duration) -> Self {
    Self { inner, limit }
  }
}

#[async_trait]
impl UserRepository for TimeoutUserRepository {
  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    bounded(self.limit, "users.create", self.inner.create(user)).await
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
    bounded(self.limit, "users.find_by_id", self.inner.find_by_id(id)).await
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    bounded(self.limit, "users.find_by_email", self.inner.find_by_email(email)).await
  }

  async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
    bounded(self.limit, "users.email_exists", self.inner.email_exists(email)).await
  }
}

/// Wraps any job store with a per-call deadline
pub struct TimeoutJobRepository {
  inner: Arc<dyn JobRepository>,
  limit: Duration,
}

impl TimeoutJobRepository {
  pub fn new(inner: Arc<dyn JobRepository>, limit: Duration) -> Self {
    Self { inner, limit }
  }
}

#[async_trait]
impl JobRepository for TimeoutJobRepository {
  async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Job>, RepositoryError> {
    bounded(self.limit, "jobs.list", self.inner.list_for_owner(owner)).await
  }

  async fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
    bounded(self.limit, "jobs.insert", self.inner.insert(job)).await
  }

  async fn update_for_owner(
    &self,
    owner: UserId,
    id: &JobId,
    changes: &JobChanges,
    now: DateTime<Utc>,
  ) -> Result<bool, RepositoryError> {
    bounded(
      self.limit,
      "jobs.update",
      self.inner.update_for_owner(owner, id, changes, now),
    )
    .await
  }

  async fn delete_for_owner(&self, owner: UserId, id: &JobId) -> Result<bool, RepositoryError> {
    bounded(self.limit, "jobs.delete", self.inner.delete_for_owner(owner, id)).await
  }
}
