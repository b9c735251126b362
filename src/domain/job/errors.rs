use thiserror::Error;

use crate::domain::errors::{RepositoryError, ValidationError};

#[derive(Debug, Error)]
pub enum JobError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}
