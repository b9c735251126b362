use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::value_objects::UserId;
use crate::domain::job::Job;

// Missing fields deserialize as empty strings so that emptiness is reported
// as a validation error rather than an unreadable body.

/// Request for account signup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
  #[serde(default)]
  #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
  pub name: String,

  #[serde(default)]
  #[validate(length(max = 320, message = "Email must be at most 320 characters"))]
  pub email: String,

  #[serde(default)]
  #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
  pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[serde(default)]
  #[validate(length(max = 320, message = "Email must be at most 320 characters"))]
  pub email: String,

  #[serde(default)]
  #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
  pub password: String,
}

/// Request for creating a job
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobRequest {
  #[serde(default)]
  #[validate(length(max = 200, message = "Company must be at most 200 characters"))]
  pub company: String,

  #[serde(default)]
  #[validate(length(max = 200, message = "Role must be at most 200 characters"))]
  pub role: String,

  #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
  pub location: Option<String>,

  pub status: Option<String>,

  #[validate(length(max = 2048, message = "Link must be at most 2048 characters"))]
  pub link: Option<String>,

  #[validate(length(max = 10000, message = "Notes must be at most 10000 characters"))]
  pub notes: Option<String>,

  #[validate(length(max = 200, message = "Source must be at most 200 characters"))]
  pub source: Option<String>,
}

/// Sparse job update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobRequest {
  #[validate(length(max = 200, message = "Company must be at most 200 characters"))]
  pub company: Option<String>,

  #[validate(length(max = 200, message = "Role must be at most 200 characters"))]
  pub role: Option<String>,

  #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
  pub location: Option<String>,

  pub status: Option<String>,

  #[validate(length(max = 2048, message = "Link must be at most 2048 characters"))]
  pub link: Option<String>,

  #[validate(length(max = 10000, message = "Notes must be at most 10000 characters"))]
  pub notes: Option<String>,

  #[validate(length(max = 200, message = "Source must be at most 200 characters"))]
  pub source: Option<String>,
}

/// Public projection of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
  pub id: UserId,
  pub name: String,
  pub email: String,
}

impl From<UserProfile> for UserDto {
  fn from(profile: UserProfile) -> Self {
    Self {
      id: profile.id,
      name: profile.name,
      email: profile.email,
    }
  }
}

/// Response after signup or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
  pub token: String,
  pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
  pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
  pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
  pub job: Job,
}

/// Body of a successful update or delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
  pub ok: bool,
}

impl OkResponse {
  pub fn ok() -> Self {
    Self { ok: true }
  }
}

/// Error body: human-readable message plus a stable machine code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
  pub code: String,
}
