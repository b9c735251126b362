use std::sync::Arc;

use crate::domain::auth::UserId;
use crate::domain::job::{JobError, JobId, JobService};

pub struct DeleteJobUseCase {
  job_service: Arc<JobService>,
}

impl DeleteJobUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(&self, owner: UserId, job_id: String) -> Result<(), JobError> {
    self.job_service.delete(owner, &JobId::new(job_id)).await
  }
}
