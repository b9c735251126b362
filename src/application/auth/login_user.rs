use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};
use crate::domain::errors::ValidationError;

/// Command for logging in
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub token: String,
  pub user: UserProfile,
}

/// Use case for user login
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the login use case
  ///
  /// # Errors
  /// Returns `AuthError::Validation` when email or password is blank and
  /// `AuthError::InvalidCredentials` for any lookup or password mismatch
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let (Ok(email), Ok(password)) = (Email::new(&command.email), Password::new(command.password))
    else {
      return Err(ValidationError::MissingCredentials.into());
    };

    let (user, token) = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      token: token.token,
      user: user.profile(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::{SignupUserCommand, SignupUserUseCase};
  use crate::test_support::auth_service;

  #[tokio::test]
  async fn test_login_after_signup() {
    let service = auth_service();
    SignupUserUseCase::new(service.clone())
      .execute(SignupUserCommand {
        name: "Lin".to_string(),
        email: "lin@example.com".to_string(),
        password: "long enough".to_string(),
      })
      .await
      .unwrap();

    let response = LoginUserUseCase::new(service)
      .execute(LoginUserCommand {
        email: "LIN@example.com ".to_string(),
        password: "long enough".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(response.user.email, "lin@example.com");
    assert_eq!(response.user.name, "Lin");
  }

  #[tokio::test]
  async fn test_blank_credentials_are_a_validation_error() {
    let use_case = LoginUserUseCase::new(auth_service());

    let result = use_case
      .execute(LoginUserCommand {
        email: "   ".to_string(),
        password: "whatever".to_string(),
      })
      .await;

    assert!(matches!(
      result,
      Err(AuthError::Validation(ValidationError::MissingCredentials))
    ));
  }
}
