use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::auth::entities::User;
use crate::domain::auth::value_objects::{Email, PasswordHash, UserId};
use crate::domain::errors::RepositoryError;
use crate::domain::job::{Job, JobId, JobStatus};

/// Stored shape of a user
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDocument {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  pub email: String,
  pub password_hash: String,
  pub created_at: BsonDateTime,
  pub updated_at: BsonDateTime,
}

impl From<&User> for UserDocument {
  fn from(user: &User) -> Self {
    Self {
      id: user.id.to_string(),
      name: user.name.clone(),
      email: user.email.as_str().to_string(),
      password_hash: user.password_hash.as_str().to_string(),
      created_at: BsonDateTime::from_chrono(user.created_at),
      updated_at: BsonDateTime::from_chrono(user.updated_at),
    }
  }
}

impl TryFrom<UserDocument> for User {
  type Error = RepositoryError;

  fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
    let id = UserId::parse(&document.id)
      .map_err(|e| RepositoryError::Serialization(format!("user id {}: {}", document.id, e)))?;

    Ok(User {
      id,
      name: document.name,
      email: Email::from_stored(document.email),
      password_hash: PasswordHash::new(document.password_hash),
      created_at: document.created_at.to_chrono(),
      updated_at: document.updated_at.to_chrono(),
    })
  }
}

/// Stored shape of a job
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JobDocument {
  #[serde(rename = "_id")]
  pub id: String,
  pub user_id: String,
  pub company: String,
  pub role: String,
  #[serde(default)]
  pub location: String,
  pub status: String,
  pub status_updated_at: BsonDateTime,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<String>,
  pub created_at: BsonDateTime,
  pub updated_at: BsonDateTime,
}

impl From<&Job> for JobDocument {
  fn from(job: &Job) -> Self {
    Self {
      id: job.id.to_string(),
      user_id: job.user_id.to_string(),
      company: job.company.clone(),
      role: job.role.clone(),
      location: job.location.clone(),
      status: job.status.as_str().to_string(),
      status_updated_at: BsonDateTime::from_chrono(job.status_updated_at),
      link: job.link.clone(),
      notes: job.notes.clone(),
      source: job.source.clone(),
      created_at: BsonDateTime::from_chrono(job.created_at),
      updated_at: BsonDateTime::from_chrono(job.updated_at),
    }
  }
}

impl TryFrom<JobDocument> for Job {
  type Error = RepositoryError;

  fn try_from(document: JobDocument) -> Result<Self, Self::Error> {
    let user_id = UserId::parse(&document.user_id).map_err(|e| {
      RepositoryError::Serialization(format!("job owner {}: {}", document.user_id, e))
    })?;
    let status = JobStatus::parse(&document.status).ok_or_else(|| {
      RepositoryError::Serialization(format!("unknown job status {}", document.status))
    })?;

    Ok(Job {
      id: JobId::new(document.id),
      user_id,
      company: document.company,
      role: document.role,
      location: document.location,
      status,
      status_updated_at: document.status_updated_at.to_chrono(),
      link: document.link,
      notes: document.notes,
      source: document.source,
      created_at: document.created_at.to_chrono(),
      updated_at: document.updated_at.to_chrono(),
    })
  }
}
