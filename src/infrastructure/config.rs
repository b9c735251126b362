use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};
use std::env;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
/// Longest accepted token lifetime (366 days); larger values are clamped
const MAX_TOKEN_TTL_MINUTES: i64 = 366 * 24 * 60;

/// Main application configuration, built once at startup and read-only after
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub auth: AuthConfig,
  #[serde(default)]
  pub storage: StorageConfig,
  #[serde(default)]
  pub mongo: MongoConfig,
  #[serde(default)]
  pub redis: RedisConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Single browser origin allowed by CORS
  pub cors_origin: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: "0.0.0.0".to_string(),
      port: 8080,
      cors_origin: "http://localhost:5173".to_string(),
    }
  }
}

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
  /// HMAC signing secret. Unset means every token operation fails closed.
  pub jwt_secret: Option<String>,
  #[serde(deserialize_with = "lenient_ttl_minutes")]
  pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
  fn default() -> Self {
    Self {
      jwt_secret: None,
      token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
    }
  }
}

impl AuthConfig {
  /// The signing secret, treating a blank value as unset
  pub fn signing_secret(&self) -> Option<&str> {
    self
      .jwt_secret
      .as_deref()
      .filter(|secret| !secret.trim().is_empty())
  }

  pub fn token_ttl(&self) -> chrono::Duration {
    let minutes = self.token_ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES);
    chrono::Duration::try_minutes(minutes)
      .unwrap_or_else(|| chrono::Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
  #[default]
  Mongo,
  Redis,
  Memory,
}

/// Store selection and naming shared by the backends
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
  pub backend: StorageBackend,
  pub users_collection: String,
  pub jobs_collection: String,
  /// Upper bound for a single store call
  pub operation_timeout_seconds: u64,
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      backend: StorageBackend::default(),
      users_collection: "users".to_string(),
      jobs_collection: "jobs".to_string(),
      operation_timeout_seconds: 5,
    }
  }
}

/// MongoDB configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
  pub uri: String,
  pub database: String,
  pub connect_timeout_seconds: u64,
}

impl Default for MongoConfig {
  fn default() -> Self {
    Self {
      uri: "mongodb://localhost:27017".to_string(),
      database: "jobtracker".to_string(),
      connect_timeout_seconds: 10,
    }
  }
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
  pub url: String,
  /// Namespace prepended to every key
  pub key_prefix: String,
  pub connect_timeout_seconds: u64,
}

impl Default for RedisConfig {
  fn default() -> Self {
    Self {
      url: "redis://127.0.0.1:6379".to_string(),
      key_prefix: "jobtracker".to_string(),
      connect_timeout_seconds: 5,
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinutes {
  Integer(i64),
  Float(f64),
  Text(String),
}

/// Accepts a number or numeric string; anything unparsable or non-positive
/// falls back to the default TTL, anything above a year is clamped.
fn lenient_ttl_minutes<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  let minutes = match Option::<RawMinutes>::deserialize(deserializer)? {
    Some(RawMinutes::Integer(value)) => value,
    Some(RawMinutes::Float(value)) => value as i64,
    Some(RawMinutes::Text(value)) => value.trim().parse().unwrap_or(0),
    None => 0,
  };

  if minutes > 0 {
    Ok(minutes.min(MAX_TOKEN_TTL_MINUTES))
  } else {
    Ok(DEFAULT_TOKEN_TTL_MINUTES)
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Sources, later ones overriding earlier ones:
  /// 1. built-in defaults
  /// 2. config/default.toml (if exists)
  /// 3. config/local.toml (if exists)
  /// 4. config/{RUN_MODE}.toml (if exists)
  /// 5. Environment variables with JOBTRACKER_ prefix
  ///
  /// # Environment Variables
  ///
  /// Sections are separated by double underscores:
  /// - `JOBTRACKER_SERVER__PORT=8080`
  /// - `JOBTRACKER_AUTH__JWT_SECRET=...`
  /// - `JOBTRACKER_AUTH__TOKEN_TTL_MINUTES=60`
  /// - `JOBTRACKER_STORAGE__BACKEND=redis`
  /// - `JOBTRACKER_MONGO__URI=mongodb://localhost:27017`
  /// - `JOBTRACKER_REDIS__URL=redis://localhost`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if a file contains invalid TOML or a value has
  /// the wrong type.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(false))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // JOBTRACKER_SERVER__PORT=8080
      .add_source(
        Environment::with_prefix("JOBTRACKER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
