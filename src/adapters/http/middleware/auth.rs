use actix_web::{
  Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
  body::EitherBody,
  dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::AUTHORIZATION,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::auth::{entities::Identity, errors::TokenError, ports::TokenService},
};

/// Identity gate for protected routes
///
/// 1. Fails closed with 500 when no signing secret is configured
/// 2. Requires `Authorization: Bearer <token>`
/// 3. Verifies the token and attaches the resulting `Identity` to request
///    extensions
///
/// Every missing header, wrong scheme or failed verification produces the same
/// 401 body; the failure kind is only logged.
pub struct AuthMiddleware {
  token_service: Arc<dyn TokenService>,
}

impl AuthMiddleware {
  pub fn new(token_service: Arc<dyn TokenService>) -> Self {
    Self { token_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      token_service: self.token_service.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  token_service: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    let verified = authenticate(&req, self.token_service.as_ref());

    Box::pin(async move {
      let identity = match verified {
        Ok(identity) => identity,
        Err(error) => {
          let (request, _) = req.into_parts();
          let response = error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(identity);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

fn authenticate(req: &ServiceRequest, token_service: &dyn TokenService) -> Result<Identity, ApiError> {
  if !token_service.is_configured() {
    return Err(ApiError::Misconfigured);
  }

  let token = extract_bearer_token(req).ok_or(ApiError::Auth(AuthErrorKind::Unauthorized))?;

  token_service.verify(token).map_err(|error| {
    if error != TokenError::Unconfigured {
      tracing::debug!("Token rejected: {}", error);
    }
    ApiError::from(error)
  })
}

/// Token after the `Bearer ` scheme, if any
fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
  req
    .headers()
    .get(AUTHORIZATION)
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|token| !token.is_empty())
}

/// Extractor for the identity attached by `AuthMiddleware`
///
/// Outside the gate it rejects with 401 instead of panicking.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequest for AuthenticatedUser {
  type Error = ApiError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(
      req
        .extensions()
        .get::<Identity>()
        .cloned()
        .map(AuthenticatedUser)
        .ok_or(ApiError::Auth(AuthErrorKind::Unauthorized)),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::{Email, UserId};
  use crate::infrastructure::security::JwtTokenService;
  use actix_web::{App, HttpResponse, http::StatusCode, test, web};
  use chrono::Duration;

  const SECRET: &str = "gate-secret";

  async fn whoami(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().body(user.0.user_id.to_string())
  }

  fn token_service(secret: Option<&str>) -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(secret, Duration::minutes(60)))
  }

  #[actix_web::test]
  async fn test_extract_bearer_token() {
    let req = test::TestRequest::default()
      .insert_header(("Authorization", "Bearer abc.def.ghi"))
      .to_srv_request();
    assert_eq!(extract_bearer_token(&req), Some("abc.def.ghi"));

    let req = test::TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();
    assert_eq!(extract_bearer_token(&req), None);

    let req = test::TestRequest::default()
      .insert_header(("Authorization", "Bearer "))
      .to_srv_request();
    assert_eq!(extract_bearer_token(&req), None);

    let req = test::TestRequest::default().to_srv_request();
    assert_eq!(extract_bearer_token(&req), None);
  }

  #[actix_web::test]
  async fn test_gate_attaches_identity() {
    let tokens = token_service(Some(SECRET));
    let user_id = UserId::generate();
    let issued = tokens
      .issue(user_id, &Email::new("gate@example.com").unwrap())
      .unwrap();

    let app = test::init_service(
      App::new().service(
        web::scope("")
          .wrap(AuthMiddleware::new(tokens))
          .route("/me", web::get().to(whoami)),
      ),
    )
    .await;

    let req = test::TestRequest::get()
      .uri("/me")
      .insert_header(("Authorization", format!("Bearer {}", issued.token)))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, user_id.to_string().as_bytes());
  }

  #[actix_web::test]
  async fn test_rejections_share_one_body() {
    let app = test::init_service(
      App::new().service(
        web::scope("")
          .wrap(AuthMiddleware::new(token_service(Some(SECRET))))
          .route("/me", web::get().to(whoami)),
      ),
    )
    .await;

    let forged = token_service(Some("another-secret"))
      .issue(UserId::generate(), &Email::new("x@example.com").unwrap())
      .unwrap();
    let expired = JwtTokenService::new(Some(SECRET), Duration::minutes(-1))
      .issue(UserId::generate(), &Email::new("x@example.com").unwrap())
      .unwrap();

    let headers = [
      None,
      Some("Token abc".to_string()),
      Some("Bearer not-a-jwt".to_string()),
      Some(format!("Bearer {}", forged.token)),
      Some(format!("Bearer {}", expired.token)),
    ];

    let mut bodies = Vec::new();
    for header in headers {
      let mut req = test::TestRequest::get().uri("/me");
      if let Some(value) = header {
        req = req.insert_header(("Authorization", value));
      }
      let resp = test::call_service(&app, req.to_request()).await;
      assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
      bodies.push(test::read_body(resp).await);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
  }

  #[actix_web::test]
  async fn test_missing_secret_fails_closed() {
    let app = test::init_service(
      App::new().service(
        web::scope("")
          .wrap(AuthMiddleware::new(token_service(None)))
          .route("/me", web::get().to(whoami)),
      ),
    )
    .await;

    let req = test::TestRequest::get()
      .uri("/me")
      .insert_header(("Authorization", "Bearer anything"))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[actix_web::test]
  async fn test_extractor_without_gate_is_unauthorized() {
    let app = test::init_service(App::new().route("/me", web::get().to(whoami))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
