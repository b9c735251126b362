use std::sync::Arc;

use super::entities::{Job, JobChanges, JobDraft};
use super::errors::JobError;
use super::ports::JobRepository;
use super::value_objects::JobId;
use crate::domain::auth::UserId;
use crate::domain::current_timestamp;

/// Owner-scoped job operations
pub struct JobService {
  job_repo: Arc<dyn JobRepository>,
}

impl JobService {
  pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
    Self { job_repo }
  }

  /// Lists the owner's jobs, most recently updated first
  pub async fn list(&self, owner: UserId) -> Result<Vec<Job>, JobError> {
    Ok(self.job_repo.list_for_owner(owner).await?)
  }

  /// Stores a new job with server-assigned id and timestamps
  pub async fn create(&self, owner: UserId, draft: JobDraft) -> Result<Job, JobError> {
    let job = Job::new(owner, draft, current_timestamp());
    let job = self.job_repo.insert(job).await?;

    tracing::debug!(job_id = %job.id, user_id = %owner, "job created");

    Ok(job)
  }

  /// Applies a sparse update. A job that does not exist, or belongs to
  /// someone else, is not reported as an error.
  pub async fn update(
    &self,
    owner: UserId,
    id: &JobId,
    changes: &JobChanges,
  ) -> Result<(), JobError> {
    let matched = self
      .job_repo
      .update_for_owner(owner, id, changes, current_timestamp())
      .await?;

    if !matched {
      tracing::debug!(job_id = %id, user_id = %owner, "update matched no job");
    }

    Ok(())
  }

  /// Deletes a job; missing and foreign ids are treated the same as success
  pub async fn delete(&self, owner: UserId, id: &JobId) -> Result<(), JobError> {
    let matched = self.job_repo.delete_for_owner(owner, id).await?;

    if !matched {
      tracing::debug!(job_id = %id, user_id = %owner, "delete matched no job");
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::job::JobStatus;
  use crate::infrastructure::persistence::memory::InMemoryJobRepository;

  fn service() -> JobService {
    JobService::new(Arc::new(InMemoryJobRepository::new()))
  }

  fn draft(company: &str, status: Option<&str>) -> JobDraft {
    JobDraft::new(company, "Engineer", Some("Remote"), status, None, None, None).unwrap()
  }

  #[tokio::test]
  async fn test_jobs_are_visible_only_to_their_owner() {
    let service = service();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let job = service.create(alice, draft("Acme", None)).await.unwrap();

    let alice_jobs = service.list(alice).await.unwrap();
    assert_eq!(alice_jobs.len(), 1);
    assert_eq!(alice_jobs[0].id, job.id);

    assert!(service.list(bob).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_create_normalizes_status() {
    let service = service();
    let owner = UserId::generate();

    let rejected = service.create(owner, draft("Acme", Some("REJECTED "))).await.unwrap();
    let fallback = service.create(owner, draft("Initech", Some("withdrawn"))).await.unwrap();

    assert_eq!(rejected.status, JobStatus::Rejected);
    assert_eq!(fallback.status, JobStatus::Applied);
  }

  #[tokio::test]
  async fn test_update_by_other_owner_has_no_effect() {
    let service = service();
    let alice = UserId::generate();
    let bob = UserId::generate();
    let job = service.create(alice, draft("Acme", None)).await.unwrap();

    let changes = JobChanges::new(Some("Hijacked"), None, None, None, None, None, None).unwrap();
    service.update(bob, &job.id, &changes).await.unwrap();

    let stored = service.list(alice).await.unwrap();
    assert_eq!(stored[0], job);
  }

  #[tokio::test]
  async fn test_delete_twice_and_foreign_delete_succeed() {
    let service = service();
    let alice = UserId::generate();
    let bob = UserId::generate();
    let job = service.create(alice, draft("Acme", None)).await.unwrap();

    service.delete(bob, &job.id).await.unwrap();
    assert_eq!(service.list(alice).await.unwrap().len(), 1);

    service.delete(alice, &job.id).await.unwrap();
    service.delete(alice, &job.id).await.unwrap();
    assert!(service.list(alice).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_list_orders_by_most_recent_update() {
    let service = service();
    let owner = UserId::generate();
    let first = service.create(owner, draft("First", None)).await.unwrap();
    let second = service.create(owner, draft("Second", None)).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let changes = JobChanges::new(None, None, None, None, None, Some("ping"), None).unwrap();
    service.update(owner, &first.id, &changes).await.unwrap();

    let jobs = service.list(owner).await.unwrap();
    assert_eq!(jobs[0].id, first.id);
    assert_eq!(jobs[1].id, second.id);
  }
}
