use std::sync::Arc;

use crate::domain::auth::UserId;
use crate::domain::job::{JobChanges, JobError, JobId, JobService};

/// Sparse update; `None` fields are left untouched
#[derive(Debug, Clone)]
pub struct UpdateJobCommand {
  pub owner: UserId,
  pub job_id: String,
  pub company: Option<String>,
  pub role: Option<String>,
  pub location: Option<String>,
  pub status: Option<String>,
  pub link: Option<String>,
  pub notes: Option<String>,
  pub source: Option<String>,
}

pub struct UpdateJobUseCase {
  job_service: Arc<JobService>,
}

impl UpdateJobCommand {
  /// Command that changes nothing but the update timestamp
  pub fn new(owner: UserId, job_id: impl Into<String>) -> Self {
    Self {
      owner,
      job_id: job_id.into(),
      company: None,
      role: None,
      location: None,
      status: None,
      link: None,
      notes: None,
      source: None,
    }
  }
}

impl UpdateJobUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  /// # Errors
  /// Returns `JobError::Validation` for an unrecognized status, before any
  /// write is attempted
  pub async fn execute(&self, command: UpdateJobCommand) -> Result<(), JobError> {
    let changes = JobChanges::new(
      command.company.as_deref(),
      command.role.as_deref(),
      command.location.as_deref(),
      command.status.as_deref(),
      command.link.as_deref(),
      command.notes.as_deref(),
      command.source.as_deref(),
    )?;

    self
      .job_service
      .update(command.owner, &JobId::new(command.job_id), &changes)
      .await
  }
}
