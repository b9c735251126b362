mod job_repository;
mod keys;
mod user_repository;

use ::redis::aio::ConnectionManager;
use std::time::Duration;

use crate::domain::errors::RepositoryError;
use crate::infrastructure::config::RedisConfig;

pub use job_repository::RedisJobRepository;
pub use keys::KeySpace;
pub use user_repository::RedisUserRepository;

/// Opens a managed connection, bounded by the configured connect timeout
pub async fn connect(config: &RedisConfig) -> Result<ConnectionManager, RepositoryError> {
  let client = ::redis::Client::open(config.url.clone())
    .map_err(|e| RepositoryError::ConnectionFailed(format!("Invalid Redis URL: {}", e)))?;

  let connection = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    client.get_connection_manager(),
  )
  .await
  .map_err(|_| {
    RepositoryError::Timeout(format!(
      "Redis connection timed out after {} seconds",
      config.connect_timeout_seconds
    ))
  })??;

  tracing::info!("Redis connection established");
  Ok(connection)
}
