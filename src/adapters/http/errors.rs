use actix_web::{
  HttpResponse,
  error::{JsonPayloadError, ResponseError},
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::errors::{AuthError, TokenError};
use crate::domain::errors::{RepositoryError, ValidationError};
use crate::domain::job::JobError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
///
/// Store and hashing details are logged, never sent to the caller.
#[derive(Debug)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication error (401 Unauthorized or 409 Conflict)
  Auth(AuthErrorKind),

  /// Signing secret missing (500 Internal Server Error)
  Misconfigured,

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
  /// Wrong email or password (401)
  InvalidCredentials,

  /// Missing, malformed, forged or expired token (401)
  Unauthorized,

  /// Email already registered (409)
  EmailAlreadyExists,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Misconfigured => write!(f, "Server misconfigured"),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
      },
      ApiError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let (code, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => {
          ("invalid_credentials", "Invalid credentials".to_string())
        }
        AuthErrorKind::Unauthorized => ("unauthorized", "Unauthorized".to_string()),
        AuthErrorKind::EmailAlreadyExists => {
          ("email_already_exists", "Email already in use".to_string())
        }
      },
      ApiError::Misconfigured => {
        tracing::error!("Token signing secret is not configured");
        ("server_misconfigured", "Server misconfigured".to_string())
      }
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        ("internal_error", "Server error".to_string())
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: message,
        code: code.to_string(),
      })
  }
}

impl From<ValidationError> for ApiError {
  fn from(error: ValidationError) -> Self {
    ApiError::Validation(error.to_string())
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::Unauthorized => ApiError::Auth(AuthErrorKind::Unauthorized),
      AuthError::Misconfigured => ApiError::Misconfigured,
      AuthError::Validation(err) => err.into(),
      AuthError::Repository(RepositoryError::DuplicateKey(_)) => {
        ApiError::Auth(AuthErrorKind::EmailAlreadyExists)
      }
      AuthError::Repository(err) => ApiError::Internal(err.to_string()),
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      AuthError::Token(err) => ApiError::Internal(err.to_string()),
    }
  }
}

impl From<JobError> for ApiError {
  fn from(error: JobError) -> Self {
    match error {
      JobError::Validation(err) => err.into(),
      JobError::Repository(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Every verification failure collapses to the same 401
impl From<TokenError> for ApiError {
  fn from(error: TokenError) -> Self {
    match error {
      TokenError::Unconfigured => ApiError::Misconfigured,
      _ => ApiError::Auth(AuthErrorKind::Unauthorized),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}

/// Error handler for `web::JsonConfig`: any unreadable body is a 400
pub fn json_error_handler(error: JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
  tracing::debug!("Rejected request body: {}", error);
  ApiError::from(ValidationError::InvalidRequestBody).into()
}
