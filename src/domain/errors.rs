use thiserror::Error;

/// Mongo server error code for a unique index violation
const MONGO_DUPLICATE_KEY: i32 = 11000;

/// Repository-related errors shared by every store backend
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Store connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Store operation timed out: {0}")]
  Timeout(String),

  #[error("Stored record could not be decoded: {0}")]
  Serialization(String),
}

/// Input validation errors raised before any store call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Missing required field: {field}")]
  MissingField { field: &'static str },

  #[error("Missing required fields")]
  MissingFields,

  #[error("Missing email or password")]
  MissingCredentials,

  #[error("Company and role are required")]
  MissingCompanyOrRole,

  #[error("Password must be at least {min} characters")]
  PasswordTooShort { min: usize },

  #[error("Invalid status")]
  InvalidStatus(String),

  #[error("Invalid request body")]
  InvalidRequestBody,
}

// Automatic conversions from store driver errors

impl From<mongodb::error::Error> for RepositoryError {
  fn from(error: mongodb::error::Error) -> Self {
    use mongodb::error::{ErrorKind, WriteFailure};

    match error.kind.as_ref() {
      ErrorKind::Write(WriteFailure::WriteError(write_error))
        if write_error.code == MONGO_DUPLICATE_KEY =>
      {
        RepositoryError::DuplicateKey(write_error.message.clone())
      }
      ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
        RepositoryError::ConnectionFailed(error.to_string())
      }
      ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
        RepositoryError::Serialization(error.to_string())
      }
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<redis::RedisError> for RepositoryError {
  fn from(error: redis::RedisError) -> Self {
    if error.is_timeout() {
      RepositoryError::Timeout(error.to_string())
    } else if error.is_connection_refusal() || error.is_connection_dropped() || error.is_io_error()
    {
      RepositoryError::ConnectionFailed(error.to_string())
    } else {
      RepositoryError::QueryFailed(error.to_string())
    }
  }
}

impl From<serde_json::Error> for RepositoryError {
  fn from(error: serde_json::Error) -> Self {
    RepositoryError::Serialization(error.to_string())
  }
}

impl From<chrono::ParseError> for RepositoryError {
  fn from(error: chrono::ParseError) -> Self {
    RepositoryError::Serialization(error.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_validation_messages() {
    assert_eq!(
      ValidationError::PasswordTooShort { min: 8 }.to_string(),
      "Password must be at least 8 characters"
    );
    assert_eq!(
      ValidationError::InvalidStatus("withdrawn".to_string()).to_string(),
      "Invalid status"
    );
  }

  #[test]
  fn test_json_error_maps_to_serialization() {
    let error = serde_json::from_str::<u32>("nope").unwrap_err();
    let repository_error: RepositoryError = error.into();
    assert!(matches!(repository_error, RepositoryError::Serialization(_)));
  }
}
