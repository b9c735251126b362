use async_trait::async_trait;

use super::entities::{Identity, IssuedToken, User};
use super::errors::{HashError, TokenError};
use super::value_objects::{Email, Password, PasswordHash, UserId};
use crate::domain::errors::RepositoryError;

/// Repository trait for account persistence
///
/// Implementations must reject a second account with the same email at write
/// time with `RepositoryError::DuplicateKey` instead of overwriting it.
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Inserts a new user; fails on a duplicate email
  async fn create(&self, user: User) -> Result<User, RepositoryError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

  /// Finds a user by their normalized email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

  /// Checks whether an account with this email exists
  async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password with a fresh salt
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError>;

  /// Verifies a plain text password against a digest; a mismatch is `Ok(false)`
  async fn verify(&self, password: &Password, digest: &PasswordHash) -> Result<bool, HashError>;
}

/// Service trait for signed identity tokens
pub trait TokenService: Send + Sync {
  /// Signs a token for the given identity
  fn issue(&self, user_id: UserId, email: &Email) -> Result<IssuedToken, TokenError>;

  /// Verifies a token and resolves it to an identity
  fn verify(&self, token: &str) -> Result<Identity, TokenError>;

  /// Whether a signing secret is available
  fn is_configured(&self) -> bool;
}
