use std::sync::Arc;

use crate::domain::auth::UserId;
use crate::domain::job::{Job, JobError, JobService};

pub struct ListJobsUseCase {
  job_service: Arc<JobService>,
}

impl ListJobsUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(&self, owner: UserId) -> Result<Vec<Job>, JobError> {
    self.job_service.list(owner).await
  }
}
