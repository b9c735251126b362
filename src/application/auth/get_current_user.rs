use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::UserId;

/// Use case for resolving the authenticated caller to their profile
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::Unauthorized` if the account no longer exists
  pub async fn execute(&self, user_id: UserId) -> Result<UserProfile, AuthError> {
    let user = self.auth_service.current_user(user_id).await?;
    Ok(user.profile())
  }
}
