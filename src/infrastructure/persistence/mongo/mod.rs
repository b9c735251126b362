mod documents;
mod job_repository;
mod user_repository;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use std::time::Duration;

use crate::domain::errors::RepositoryError;
use crate::infrastructure::config::{MongoConfig, StorageConfig};

pub use job_repository::MongoJobRepository;
pub use user_repository::MongoUserRepository;

/// Connects to MongoDB, pings the server, and makes sure the indexes exist
pub async fn connect(mongo: &MongoConfig, storage: &StorageConfig) -> Result<Database, RepositoryError> {
  let timeout = Duration::from_secs(mongo.connect_timeout_seconds);

  let mut options = ClientOptions::parse(&mongo.uri).await?;
  options.app_name = Some("jobtracker".to_string());
  options.connect_timeout = Some(timeout);
  options.server_selection_timeout = Some(timeout);

  let client = Client::with_options(options)?;
  let database = client.database(&mongo.database);

  database.run_command(doc! { "ping": 1 }).await?;
  tracing::info!(database = %mongo.database, "connected to MongoDB");

  ensure_indexes(&database, storage).await?;

  Ok(database)
}

/// Unique email on users; owner + recency on jobs
pub async fn ensure_indexes(database: &Database, storage: &StorageConfig) -> Result<(), RepositoryError> {
  database
    .collection::<mongodb::bson::Document>(&storage.users_collection)
    .create_index(
      IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build(),
    )
    .await?;

  database
    .collection::<mongodb::bson::Document>(&storage.jobs_collection)
    .create_index(
      IndexModel::builder()
        .keys(doc! { "userId": 1, "updatedAt": -1 })
        .build(),
    )
    .await?;

  tracing::debug!("MongoDB indexes ensured");
  Ok(())
}
