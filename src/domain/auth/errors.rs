use thiserror::Error;

use crate::domain::errors::{RepositoryError, ValidationError};

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials")]
  InvalidCredentials,

  #[error("Email already in use")]
  EmailAlreadyExists,

  #[error("Unauthorized")]
  Unauthorized,

  #[error("Token signing secret is not configured")]
  Misconfigured,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(TokenError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),
}

impl From<TokenError> for AuthError {
  fn from(error: TokenError) -> Self {
    match error {
      TokenError::Unconfigured => AuthError::Misconfigured,
      other => AuthError::Token(other),
    }
  }
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

/// Token issuing and verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
  #[error("Token is malformed")]
  Malformed,

  #[error("Token signature does not match")]
  BadSignature,

  #[error("Token has expired")]
  Expired,

  #[error("Token uses an unexpected signing algorithm")]
  WrongAlgorithm,

  #[error("Token signing secret is not configured")]
  Unconfigured,

  #[error("Failed to sign token: {0}")]
  SigningFailed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
  fn from(error: jsonwebtoken::errors::Error) -> Self {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
      ErrorKind::ExpiredSignature => TokenError::Expired,
      ErrorKind::InvalidSignature => TokenError::BadSignature,
      ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => TokenError::WrongAlgorithm,
      _ => TokenError::Malformed,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unconfigured_token_error_becomes_misconfigured() {
    let error: AuthError = TokenError::Unconfigured.into();
    assert!(matches!(error, AuthError::Misconfigured));

    let error: AuthError = TokenError::Expired.into();
    assert!(matches!(error, AuthError::Token(TokenError::Expired)));
  }
}
