pub mod auth;
pub mod jobs;

use actix_web::HttpResponse;

/// GET /
pub async fn index_handler() -> HttpResponse {
  HttpResponse::Ok().body("hello world")
}

/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}
