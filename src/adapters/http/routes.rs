use actix_cors::Cors;
use actix_web::{http::header, web};
use std::sync::Arc;

use crate::application::auth::{GetCurrentUserUseCase, LoginUserUseCase, SignupUserUseCase};
use crate::application::job::{
  CreateJobUseCase, DeleteJobUseCase, ListJobsUseCase, UpdateJobUseCase,
};
use crate::domain::auth::ports::{PasswordHasher, TokenService, UserRepository};
use crate::domain::auth::services::AuthService;
use crate::domain::job::{JobRepository, JobService};

use super::errors::json_error_handler;
use super::handlers::auth::{current_user_handler, login_handler, signup_handler};
use super::handlers::jobs::{
  create_job_handler, delete_job_handler, list_jobs_handler, update_job_handler,
};
use super::handlers::{health_handler, index_handler};
use super::middleware::AuthMiddleware;

/// Everything the HTTP surface needs, wired once at startup
#[derive(Clone)]
pub struct ApiDependencies {
  pub token_service: Arc<dyn TokenService>,
  pub signup_use_case: Arc<SignupUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
  pub list_jobs_use_case: Arc<ListJobsUseCase>,
  pub create_job_use_case: Arc<CreateJobUseCase>,
  pub update_job_use_case: Arc<UpdateJobUseCase>,
  pub delete_job_use_case: Arc<DeleteJobUseCase>,
}

impl ApiDependencies {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    job_repo: Arc<dyn JobRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
  ) -> Self {
    let auth_service = Arc::new(AuthService::new(
      user_repo,
      password_hasher,
      token_service.clone(),
    ));
    let job_service = Arc::new(JobService::new(job_repo));

    Self {
      token_service,
      signup_use_case: Arc::new(SignupUserUseCase::new(auth_service.clone())),
      login_use_case: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      get_user_use_case: Arc::new(GetCurrentUserUseCase::new(auth_service)),
      list_jobs_use_case: Arc::new(ListJobsUseCase::new(job_service.clone())),
      create_job_use_case: Arc::new(CreateJobUseCase::new(job_service.clone())),
      update_job_use_case: Arc::new(UpdateJobUseCase::new(job_service.clone())),
      delete_job_use_case: Arc::new(DeleteJobUseCase::new(job_service)),
    }
  }
}

/// CORS policy for the single configured browser origin
pub fn cors(allowed_origin: &str) -> Cors {
  Cors::default()
    .allowed_origin(allowed_origin)
    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
    .allowed_headers(vec![
      header::ORIGIN,
      header::CONTENT_TYPE,
      header::ACCEPT,
      header::AUTHORIZATION,
    ])
    .max_age(3600)
}

/// Mounts every route
///
/// # Routes
///
/// - GET / - Greeting
/// - GET /health - Liveness probe
/// - POST /api/auth/signup - Create an account and sign a token
/// - POST /api/auth/login - Sign a token for existing credentials
/// - GET /api/me - Current user (protected)
/// - GET|POST /api/jobs - List or create jobs (protected)
/// - PUT|DELETE /api/jobs/{id} - Update or delete a job (protected)
pub fn configure_routes(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::Data::new(deps.signup_use_case.clone()))
    .app_data(web::Data::new(deps.login_use_case.clone()))
    .app_data(web::Data::new(deps.get_user_use_case.clone()))
    .app_data(web::Data::new(deps.list_jobs_use_case.clone()))
    .app_data(web::Data::new(deps.create_job_use_case.clone()))
    .app_data(web::Data::new(deps.update_job_use_case.clone()))
    .app_data(web::Data::new(deps.delete_job_use_case.clone()))
    .route("/", web::get().to(index_handler))
    .route("/health", web::get().to(health_handler))
    .service(
      web::scope("/api")
        .service(
          web::scope("/auth")
            .route("/signup", web::post().to(signup_handler))
            .route("/login", web::post().to(login_handler)),
        )
        .service(
          web::resource("/me")
            .wrap(AuthMiddleware::new(deps.token_service.clone()))
            .route(web::get().to(current_user_handler)),
        )
        .service(
          web::scope("/jobs")
            .wrap(AuthMiddleware::new(deps.token_service.clone()))
            .route("", web::get().to(list_jobs_handler))
            .route("", web::post().to(create_job_handler))
            .route("/", web::get().to(list_jobs_handler))
            .route("/", web::post().to(create_job_handler))
            .route("/{id}", web::put().to(update_job_handler))
            .route("/{id}", web::delete().to(delete_job_handler)),
        ),
    );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::http::dtos::{AuthResponse, ErrorResponse, JobResponse, JobsResponse};
  use crate::domain::auth::{Email, UserId};
  use crate::domain::job::JobStatus;
  use crate::infrastructure::persistence::Repositories;
  use crate::infrastructure::security::{Argon2PasswordHasher, JwtTokenService};
  use actix_web::{
    App,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test,
  };
  use chrono::Duration;
  use serde_json::json;

  const SECRET: &str = "routes-test-secret";

  fn dependencies(secret: Option<&str>) -> ApiDependencies {
    let repositories = Repositories::in_memory();
    ApiDependencies::new(
      repositories.users,
      repositories.jobs,
      Arc::new(Argon2PasswordHasher::with_params(4096, 1, 1).unwrap()),
      Arc::new(JwtTokenService::new(secret, Duration::minutes(60))),
    )
  }

  async fn app(
    deps: ApiDependencies,
  ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(App::new().configure(|cfg| configure_routes(cfg, &deps))).await
  }

  async fn signup<S>(app: &S, email: &str) -> AuthResponse
  where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
  {
    let req = test::TestRequest::post()
      .uri("/api/auth/signup")
      .set_json(json!({ "name": "Sam", "email": email, "password": "password123" }))
      .to_request();
    test::call_and_read_body_json(app, req).await
  }

  fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
  }

  #[actix_web::test]
  async fn test_greeting_and_health() {
    let app = app(dependencies(Some(SECRET))).await;

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(body, "hello world");

    let body =
      test::call_and_read_body(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(body, "OK");
  }

  #[actix_web::test]
  async fn test_signup_token_resolves_to_me() {
    let app = app(dependencies(Some(SECRET))).await;
    let auth = signup(&app, " Sam@Example.com ").await;
    assert_eq!(auth.user.email, "sam@example.com");

    let req = test::TestRequest::get()
      .uri("/api/me")
      .insert_header(bearer(&auth.token))
      .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["user"]["id"], auth.user.id.to_string());
    assert_eq!(body["user"]["name"], "Sam");
    assert!(body["user"].get("passwordHash").is_none());
  }

  #[actix_web::test]
  async fn test_signup_conflict_and_validation() {
    let app = app(dependencies(Some(SECRET))).await;
    signup(&app, "sam@example.com").await;

    let req = test::TestRequest::post()
      .uri("/api/auth/signup")
      .set_json(json!({ "name": "Sam", "email": "SAM@example.com", "password": "password123" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
      .uri("/api/auth/signup")
      .set_json(json!({ "name": "Sam", "email": "new@example.com", "password": "short" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "Password must be at least 8 characters");

    let req = test::TestRequest::post()
      .uri("/api/auth/signup")
      .set_json(json!({ "email": "new@example.com", "password": "password123" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn test_malformed_body_is_bad_request() {
    let app = app(dependencies(Some(SECRET))).await;

    let req = test::TestRequest::post()
      .uri("/api/auth/login")
      .insert_header((header::CONTENT_TYPE, "application/json"))
      .set_payload("{not json")
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "Invalid request body");
  }

  #[actix_web::test]
  async fn test_login_failures_share_one_shape() {
    let app = app(dependencies(Some(SECRET))).await;
    signup(&app, "sam@example.com").await;

    let mut bodies = Vec::new();
    for (email, password) in [
      ("sam@example.com", "wrong-password"),
      ("nobody@example.com", "password123"),
    ] {
      let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
      let resp = test::call_service(&app, req).await;
      assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
      bodies.push(test::read_body(resp).await);
    }
    assert_eq!(bodies[0], bodies[1]);

    let req = test::TestRequest::post()
      .uri("/api/auth/login")
      .set_json(json!({ "email": "", "password": "password123" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn test_missing_secret_fails_closed_everywhere() {
    let app = app(dependencies(None)).await;

    let req = test::TestRequest::post()
      .uri("/api/auth/signup")
      .set_json(json!({ "name": "Sam", "email": "sam@example.com", "password": "password123" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/jobs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[actix_web::test]
  async fn test_jobs_require_a_valid_token() {
    let app = app(dependencies(Some(SECRET))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/jobs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let expired = JwtTokenService::new(Some(SECRET), Duration::minutes(-1))
      .issue(UserId::generate(), &Email::new("old@example.com").unwrap())
      .unwrap();
    let req = test::TestRequest::get()
      .uri("/api/jobs")
      .insert_header(bearer(&expired.token))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[actix_web::test]
  async fn test_job_round_trip_and_isolation() {
    let app = app(dependencies(Some(SECRET))).await;
    let alice = signup(&app, "alice@example.com").await;
    let bob = signup(&app, "bob@example.com").await;

    let req = test::TestRequest::post()
      .uri("/api/jobs")
      .insert_header(bearer(&alice.token))
      .set_json(json!({
        "company": "Acme",
        "role": "Engineer",
        "location": "Remote",
        "status": "REJECTED ",
        "link": "https://acme.test/jobs/1",
        "notes": "Referred by Kim",
        "source": "referral"
      }))
      .to_request();
    let created: JobResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.job.status, JobStatus::Rejected);

    let req = test::TestRequest::get()
      .uri("/api/jobs")
      .insert_header(bearer(&alice.token))
      .to_request();
    let listed: JobsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.jobs, vec![created.job.clone()]);

    let job = &listed.jobs[0];
    assert_eq!(job.company, "Acme");
    assert_eq!(job.role, "Engineer");
    assert_eq!(job.location, "Remote");
    assert_eq!(job.link.as_deref(), Some("https://acme.test/jobs/1"));
    assert_eq!(job.notes.as_deref(), Some("Referred by Kim"));
    assert_eq!(job.source.as_deref(), Some("referral"));

    let req = test::TestRequest::get()
      .uri("/api/jobs")
      .insert_header(bearer(&bob.token))
      .to_request();
    let listed: JobsResponse = test::call_and_read_body_json(&app, req).await;
    assert!(listed.jobs.is_empty());
  }

  #[actix_web::test]
  async fn test_unknown_status_falls_back_on_create() {
    let app = app(dependencies(Some(SECRET))).await;
    let auth = signup(&app, "sam@example.com").await;

    let req = test::TestRequest::post()
      .uri("/api/jobs")
      .insert_header(bearer(&auth.token))
      .set_json(json!({ "company": "Acme", "role": "Engineer", "status": "withdrawn" }))
      .to_request();
    let created: JobResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.job.status, JobStatus::Applied);

    let req = test::TestRequest::post()
      .uri("/api/jobs")
      .insert_header(bearer(&auth.token))
      .set_json(json!({ "company": "  ", "role": "Engineer" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn test_invalid_status_update_changes_nothing() {
    let app = app(dependencies(Some(SECRET))).await;
    let auth = signup(&app, "sam@example.com").await;

    let req = test::TestRequest::post()
      .uri("/api/jobs")
      .insert_header(bearer(&auth.token))
      .set_json(json!({ "company": "Acme", "role": "Engineer" }))
      .to_request();
    let created: JobResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
      .uri(&format!("/api/jobs/{}", created.job.id))
      .insert_header(bearer(&auth.token))
      .set_json(json!({ "company": "Changed", "status": "withdrawn" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "Invalid status");

    let req = test::TestRequest::get()
      .uri("/api/jobs")
      .insert_header(bearer(&auth.token))
      .to_request();
    let listed: JobsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.jobs, vec![created.job]);
  }

  #[actix_web::test]
  async fn test_update_and_delete_do_not_reveal_ownership() {
    let app = app(dependencies(Some(SECRET))).await;
    let alice = signup(&app, "alice@example.com").await;
    let bob = signup(&app, "bob@example.com").await;

    let req = test::TestRequest::post()
      .uri("/api/jobs")
      .insert_header(bearer(&alice.token))
      .set_json(json!({ "company": "Acme", "role": "Engineer" }))
      .to_request();
    let created: JobResponse = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/jobs/{}", created.job.id);

    let req = test::TestRequest::put()
      .uri(&uri)
      .insert_header(bearer(&bob.token))
      .set_json(json!({ "company": "Hijacked" }))
      .to_request();
    let foreign_update = test::call_and_read_body(&app, req).await;

    let req = test::TestRequest::delete()
      .uri(&uri)
      .insert_header(bearer(&bob.token))
      .to_request();
    let foreign_delete = test::call_and_read_body(&app, req).await;

    let req = test::TestRequest::delete()
      .uri(&uri)
      .insert_header(bearer(&alice.token))
      .to_request();
    let first_delete = test::call_and_read_body(&app, req).await;

    let req = test::TestRequest::delete()
      .uri(&uri)
      .insert_header(bearer(&alice.token))
      .to_request();
    let second_delete = test::call_and_read_body(&app, req).await;

    assert_eq!(foreign_update, r#"{"ok":true}"#);
    assert_eq!(foreign_delete, first_delete);
    assert_eq!(first_delete, second_delete);

    let req = test::TestRequest::get()
      .uri("/api/jobs")
      .insert_header(bearer(&alice.token))
      .to_request();
    let listed: JobsResponse = test::call_and_read_body_json(&app, req).await;
    assert!(listed.jobs.is_empty());
  }

  #[actix_web::test]
  async fn test_cors_preflight_allows_configured_origin() {
    let deps = dependencies(Some(SECRET));
    let app = test::init_service(
      App::new()
        .wrap(cors("http://localhost:5173"))
        .configure(|cfg| configure_routes(cfg, &deps)),
    )
    .await;

    let req = test::TestRequest::default()
      .method(actix_web::http::Method::OPTIONS)
      .uri("/api/jobs")
      .insert_header((header::ORIGIN, "http://localhost:5173"))
      .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PUT"))
      .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
      resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .unwrap(),
      "http://localhost:5173"
    );
  }
}
