use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AuthResponse, CurrentUserResponse, LoginRequest, SignupRequest},
  errors::ApiError,
  middleware::AuthenticatedUser,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, SignupUserCommand, SignupUserUseCase,
};

/// Handler for account signup
///
/// POST /api/auth/signup
/// Body: SignupRequest (JSON)
/// Response: AuthResponse (JSON) with status 200
pub async fn signup_handler(
  request: web::Json<SignupRequest>,
  use_case: web::Data<Arc<SignupUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(SignupUserCommand {
      name: request.name,
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(AuthResponse {
    token: response.token,
    user: response.user.into(),
  }))
}

/// Handler for user login
///
/// POST /api/auth/login
/// Body: LoginRequest (JSON)
/// Response: AuthResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let response = use_case
    .execute(LoginUserCommand {
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(AuthResponse {
    token: response.token,
    user: response.user.into(),
  }))
}

/// GET /api/me
pub async fn current_user_handler(
  user: AuthenticatedUser,
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let profile = use_case.execute(user.0.user_id).await?;

  Ok(HttpResponse::Ok().json(CurrentUserResponse {
    user: profile.into(),
  }))
}
