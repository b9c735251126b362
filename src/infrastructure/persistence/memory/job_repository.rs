use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::auth::value_objects::UserId;
use crate::domain::errors::RepositoryError;
use crate::domain::job::{Job, JobChanges, JobId, JobRepository};

/// Process-local job store, partitioned by owner
#[derive(Default)]
pub struct InMemoryJobRepository {
  jobs: RwLock<HashMap<UserId, Vec<Job>>>,
}

impl InMemoryJobRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
  async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Job>, RepositoryError> {
    let jobs = self.jobs.read().await;

    let mut owned: Vec<Job> = jobs.get(&owner).cloned().unwrap_or_default();
    // stable sort keeps insertion order for equal timestamps
    owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    Ok(owned)
  }

  async fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
    let mut jobs = self.jobs.write().await;
    let owned = jobs.entry(job.user_id).or_default();

    if owned.iter().any(|existing| existing.id == job.id) {
      return Err(RepositoryError::DuplicateKey(format!("job {} already exists", job.id)));
    }

    owned.push(job.clone());
    Ok(job)
  }

  async fn update_for_owner(
    &self,
    owner: UserId,
    id: &JobId,
    changes: &JobChanges,
    now: DateTime<Utc>,
  ) -> Result<bool, RepositoryError> {
    let mut jobs = self.jobs.write().await;

    let Some(job) = jobs
      .get_mut(&owner)
      .and_then(|owned| owned.iter_mut().find(|job| &job.id == id))
    else {
      return Ok(false);
    };

    changes.apply(job, now);
    Ok(true)
  }

  async fn delete_for_owner(&self, owner: UserId, id: &JobId) -> Result<bool, RepositoryError> {
    let mut jobs = self.jobs.write().await;

    let Some(owned) = jobs.get_mut(&owner) else {
      return Ok(false);
    };

    let before = owned.len();
    owned.retain(|job| &job.id != id);

    Ok(owned.len() != before)
  }
}
