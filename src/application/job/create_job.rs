use std::sync::Arc;

use crate::domain::auth::UserId;
use crate::domain::job::{Job, JobDraft, JobError, JobService};

#[derive(Debug, Clone)]
pub struct CreateJobCommand {
  pub owner: UserId,
  pub company: String,
  pub role: String,
  pub location: Option<String>,
  pub status: Option<String>,
  pub link: Option<String>,
  pub notes: Option<String>,
  pub source: Option<String>,
}

pub struct CreateJobUseCase {
  job_service: Arc<JobService>,
}

impl CreateJobCommand {
  /// Command with only the required fields set
  pub fn new(owner: UserId, company: impl Into<String>, role: impl Into<String>) -> Self {
    Self {
      owner,
      company: company.into(),
      role: role.into(),
      location: None,
      status: None,
      link: None,
      notes: None,
      source: None,
    }
  }
}

impl CreateJobUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  /// # Errors
  /// Returns `JobError::Validation` when company or role is blank
  pub async fn execute(&self, command: CreateJobCommand) -> Result<Job, JobError> {
    let draft = JobDraft::new(
      &command.company,
      &command.role,
      command.location.as_deref(),
      command.status.as_deref(),
      command.link.as_deref(),
      command.notes.as_deref(),
      command.source.as_deref(),
    )?;

    self.job_service.create(command.owner, draft).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::errors::ValidationError;
  use crate::domain::job::JobStatus;
  use crate::test_support::job_service;

  #[tokio::test]
  async fn test_create_trims_and_defaults() {
    let use_case = CreateJobUseCase::new(job_service());
    let owner = UserId::generate();

    let job = use_case
      .execute(CreateJobCommand {
        status: Some("withdrawn".to_string()),
        link: Some("   ".to_string()),
        ..CreateJobCommand::new(owner, " Acme ", "Engineer ")
      })
      .await
      .unwrap();

    assert_eq!(job.user_id, owner);
    assert_eq!(job.company, "Acme");
    assert_eq!(job.role, "Engineer");
    assert_eq!(job.status, JobStatus::Applied);
    assert_eq!(job.link, None);
  }

  #[tokio::test]
  async fn test_blank_role_is_rejected() {
    let use_case = CreateJobUseCase::new(job_service());

    let result = use_case
      .execute(CreateJobCommand::new(UserId::generate(), "Acme", " "))
      .await;

    assert!(matches!(
      result,
      Err(JobError::Validation(ValidationError::MissingCompanyOrRole))
    ));
  }
}
