use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{DisplayName, Email, Password};
use crate::domain::errors::ValidationError;

/// Command for creating a new account
#[derive(Debug, Clone)]
pub struct SignupUserCommand {
  pub name: String,
  pub email: String,
  /// Plain text, hashed before it is stored
  pub password: String,
}

/// Response after successful signup
#[derive(Debug, Clone)]
pub struct SignupUserResponse {
  pub token: String,
  pub user: UserProfile,
}

/// Use case for signing up a new user
pub struct SignupUserUseCase {
  auth_service: Arc<AuthService>,
}

impl SignupUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the signup use case
  ///
  /// Name, email and password must all be present before the password length
  /// is checked.
  ///
  /// # Errors
  /// Returns `AuthError::Validation` for missing fields or a short password,
  /// `AuthError::EmailAlreadyExists` for a taken email
  pub async fn execute(&self, command: SignupUserCommand) -> Result<SignupUserResponse, AuthError> {
    let name = DisplayName::new(&command.name);
    let email = Email::new(&command.email);
    let password = Password::new(command.password);

    let (Ok(name), Ok(email), Ok(password)) = (name, email, password) else {
      return Err(ValidationError::MissingFields.into());
    };

    password.ensure_min_length()?;

    let (user, token) = self.auth_service.signup(name, email, password).await?;

    Ok(SignupUserResponse {
      token: token.token,
      user: user.profile(),
    })
  }
}
