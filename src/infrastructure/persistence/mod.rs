pub mod memory;
pub mod mongo;
pub mod redis;
mod timeout;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::auth::ports::UserRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::job::JobRepository;
use crate::infrastructure::config::{Config, StorageBackend};

pub use timeout::{TimeoutJobRepository, TimeoutUserRepository};

/// The pair of stores the application runs against
#[derive(Clone)]
pub struct Repositories {
  pub users: Arc<dyn UserRepository>,
  pub jobs: Arc<dyn JobRepository>,
}

impl Repositories {
  /// Connects the configured backend; every call is bounded by the
  /// configured operation timeout
  pub async fn connect(config: &Config) -> Result<Self, RepositoryError> {
    let (users, jobs): (Arc<dyn UserRepository>, Arc<dyn JobRepository>) =
      match config.storage.backend {
        StorageBackend::Mongo => {
          tracing::info!("Connecting to MongoDB: {}", config.mongo.uri);
          let database = mongo::connect(&config.mongo, &config.storage).await?;
          (
            Arc::new(mongo::MongoUserRepository::new(
              &database,
              &config.storage.users_collection,
            )),
            Arc::new(mongo::MongoJobRepository::new(
              &database,
              &config.storage.jobs_collection,
            )),
          )
        }
        StorageBackend::Redis => {
          tracing::info!("Connecting to Redis: {}", config.redis.url);
          let connection = redis::connect(&config.redis).await?;
          let keys = redis::KeySpace::new(
            &config.redis.key_prefix,
            &config.storage.users_collection,
            &config.storage.jobs_collection,
          );
          (
            Arc::new(redis::RedisUserRepository::new(
              connection.clone(),
              keys.clone(),
            )),
            Arc::new(redis::RedisJobRepository::new(connection, keys)),
          )
        }
        StorageBackend::Memory => {
          tracing::warn!("Using in-memory storage; data is lost on restart");
          (
            Arc::new(memory::InMemoryUserRepository::new()),
            Arc::new(memory::InMemoryJobRepository::new()),
          )
        }
      };

    Ok(Self::with_timeout(
      users,
      jobs,
      Duration::from_secs(config.storage.operation_timeout_seconds),
    ))
  }

  pub fn with_timeout(
    users: Arc<dyn UserRepository>,
    jobs: Arc<dyn JobRepository>,
    limit: Duration,
  ) -> Self {
    Self {
      users: Arc::new(TimeoutUserRepository::new(users, limit)),
      jobs: Arc::new(TimeoutJobRepository::new(jobs, limit)),
    }
  }

  pub fn in_memory() -> Self {
    Self {
      users: Arc::new(memory::InMemoryUserRepository::new()),
      jobs: Arc::new(memory::InMemoryJobRepository::new()),
    }
  }
}
