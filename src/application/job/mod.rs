//! Job use cases
//!
//! Every command carries the caller's verified `UserId`; nothing here accepts
//! an owner from request input.

mod create_job;
mod delete_job;
mod list_jobs;
mod update_job;

pub use create_job::{CreateJobCommand, CreateJobUseCase};
pub use delete_job::DeleteJobUseCase;
pub use list_jobs::ListJobsUseCase;
pub use update_job::{UpdateJobCommand, UpdateJobUseCase};
