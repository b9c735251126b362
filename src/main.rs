use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobtracker::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_routes, cors},
  infrastructure::{
    config::Config,
    persistence::Repositories,
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jobtracker=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting jobtracker");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  if config.auth.signing_secret().is_none() {
    tracing::warn!(
      "JOBTRACKER_AUTH__JWT_SECRET is not set; signup, login and protected routes will fail"
    );
  }

  let repositories = Repositories::connect(&config)
    .await
    .context("Failed to connect to storage")?;
  tracing::info!(backend = ?config.storage.backend, "Storage ready");

  let password_hasher =
    Argon2PasswordHasher::new().context("Failed to initialize password hasher")?;
  let token_service = JwtTokenService::from_config(&config.auth);

  let deps = ApiDependencies::new(
    repositories.users,
    repositories.jobs,
    Arc::new(password_hasher),
    Arc::new(token_service),
  );

  let bind_address = format!("{}:{}", config.server.host, config.server.port);
  let cors_origin = config.server.cors_origin.clone();

  tracing::info!("Starting HTTP server on {}", bind_address);

  HttpServer::new(move || {
    App::new()
      .wrap(cors(&cors_origin))
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .configure(|cfg| configure_routes(cfg, &deps))
  })
  .bind(&bind_address)
  .with_context(|| format!("Failed to bind {}", bind_address))?
  .run()
  .await?;

  Ok(())
}
