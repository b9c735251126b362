use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CreateJobRequest, JobResponse, JobsResponse, OkResponse, UpdateJobRequest},
  errors::ApiError,
  middleware::AuthenticatedUser,
};
use crate::application::job::{
  CreateJobCommand, CreateJobUseCase, DeleteJobUseCase, ListJobsUseCase, UpdateJobCommand,
  UpdateJobUseCase,
};

/// GET /api/jobs
pub async fn list_jobs_handler(
  user: AuthenticatedUser,
  use_case: web::Data<Arc<ListJobsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let jobs = use_case.execute(user.0.user_id).await?;
  Ok(HttpResponse::Ok().json(JobsResponse { jobs }))
}

/// Handler for creating a job
///
/// POST /api/jobs
/// Body: CreateJobRequest (JSON)
/// Response: JobResponse with the stored job
pub async fn create_job_handler(
  user: AuthenticatedUser,
  request: web::Json<CreateJobRequest>,
  use_case: web::Data<Arc<CreateJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let job = use_case
    .execute(CreateJobCommand {
      owner: user.0.user_id,
      company: request.company,
      role: request.role,
      location: request.location,
      status: request.status,
      link: request.link,
      notes: request.notes,
      source: request.source,
    })
    .await?;

  Ok(HttpResponse::Ok().json(JobResponse { job }))
}

/// Handler for a sparse job update
///
/// PUT /api/jobs/{id}
/// Answers `{"ok": true}` whether or not a job matched.
pub async fn update_job_handler(
  user: AuthenticatedUser,
  path: web::Path<String>,
  request: web::Json<UpdateJobRequest>,
  use_case: web::Data<Arc<UpdateJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  use_case
    .execute(UpdateJobCommand {
      owner: user.0.user_id,
      job_id: path.into_inner(),
      company: request.company,
      role: request.role,
      location: request.location,
      status: request.status,
      link: request.link,
      notes: request.notes,
      source: request.source,
    })
    .await?;

  Ok(HttpResponse::Ok().json(OkResponse::ok()))
}

/// DELETE /api/jobs/{id}
pub async fn delete_job_handler(
  user: AuthenticatedUser,
  path: web::Path<String>,
  use_case: web::Data<Arc<DeleteJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(user.0.user_id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(OkResponse::ok()))
}
