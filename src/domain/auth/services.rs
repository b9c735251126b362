use std::sync::Arc;

use super::entities::{IssuedToken, User};
use super::errors::AuthError;
use super::ports::{PasswordHasher, TokenService, UserRepository};
use super::value_objects::{DisplayName, Email, Password, UserId};
use crate::domain::current_timestamp;
use crate::domain::errors::RepositoryError;

/// Authentication service implementing signup, login and identity lookup
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_service: Arc<dyn TokenService>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      token_service,
    }
  }

  /// Registers a new account and signs a token for it
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if the email is already registered,
  /// either by the pre-check or by the store's own uniqueness constraint.
  /// Returns `AuthError::Misconfigured` before touching the store when no
  /// signing secret is configured.
  pub async fn signup(
    &self,
    name: DisplayName,
    email: Email,
    password: Password,
  ) -> Result<(User, IssuedToken), AuthError> {
    if !self.token_service.is_configured() {
      return Err(AuthError::Misconfigured);
    }

    if self.user_repo.email_exists(&email).await? {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(name, email, password_hash, current_timestamp());

    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(RepositoryError::DuplicateKey(_)) => return Err(AuthError::EmailAlreadyExists),
      Err(e) => return Err(e.into()),
    };

    let token = self
      .token_service
      .issue(created_user.id, &created_user.email)?;

    tracing::info!(user_id = %created_user.id, "account created");

    Ok((created_user, token))
  }

  /// Authenticates credentials and signs a token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email, a wrong
  /// password, or a failed lookup, so callers cannot tell them apart.
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(User, IssuedToken), AuthError> {
    let user = match self.user_repo.find_by_email(&email).await {
      Ok(Some(user)) => user,
      Ok(None) => return Err(AuthError::InvalidCredentials),
      Err(e) => {
        tracing::error!("User lookup failed during login: {}", e);
        return Err(AuthError::InvalidCredentials);
      }
    };

    let matches = self
      .password_hasher
      .verify(&password, &user.password_hash)
      .await?;

    if !matches {
      return Err(AuthError::InvalidCredentials);
    }

    let token = self.token_service.issue(user.id, &user.email)?;

    Ok((user, token))
  }

  /// Resolves a verified identity to its stored account
  ///
  /// # Errors
  /// Returns `AuthError::Unauthorized` when the account no longer exists
  pub async fn current_user(&self, user_id: UserId) -> Result<User, AuthError> {
    match self.user_repo.find_by_id(user_id).await {
      Ok(Some(user)) => Ok(user),
      Ok(None) => Err(AuthError::Unauthorized),
      Err(e) => {
        tracing::error!("User lookup failed for {}: {}", user_id, e);
        Err(AuthError::Unauthorized)
      }
    }
  }
}
