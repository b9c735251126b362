use ::redis::AsyncCommands;
use ::redis::Script;
use ::redis::aio::ConnectionManager;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::keys::KeySpace;
use crate::domain::auth::{
  entities::User,
  ports::UserRepository,
  value_objects::{Email, PasswordHash, UserId},
};
use crate::domain::errors::RepositoryError;

/// Claims the email key, then records the id index. Returns 0 when the email
/// is already taken.
const CREATE_USER_SCRIPT: &str = r#"
if redis.call('SET', KEYS[1], ARGV[1], 'NX') then
  redis.call('SET', KEYS[2], ARGV[2])
  return 1
end
return 0
"#;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
  id: UserId,
  name: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<&User> for StoredUser {
  fn from(user: &User) -> Self {
    Self {
      id: user.id,
      name: user.name.clone(),
      email: user.email.as_str().to_string(),
      password_hash: user.password_hash.as_str().to_string(),
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}

impl From<StoredUser> for User {
  fn from(stored: StoredUser) -> Self {
    User {
      id: stored.id,
      name: stored.name,
      email: Email::from_stored(stored.email),
      password_hash: PasswordHash::new(stored.password_hash),
      created_at: stored.created_at,
      updated_at: stored.updated_at,
    }
  }
}

/// Redis implementation of the UserRepository trait
pub struct RedisUserRepository {
  connection: ConnectionManager,
  keys: KeySpace,
  create_script: Script,
}

impl RedisUserRepository {
  pub fn new(connection: ConnectionManager, keys: KeySpace) -> Self {
    Self {
      connection,
      keys,
      create_script: Script::new(CREATE_USER_SCRIPT),
    }
  }

  async fn load(&self, key: &str) -> Result<Option<User>, RepositoryError> {
    let mut conn = self.connection.clone();
    let payload: Option<String> = conn.get(key).await?;

    match payload {
      Some(json) => {
        let stored: StoredUser = serde_json::from_str(&json)?;
        Ok(Some(stored.into()))
      }
      None => Ok(None),
    }
  }
}

#[async_trait]
impl UserRepository for RedisUserRepository {
  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let payload = serde_json::to_string(&StoredUser::from(&user))?;
    let mut conn = self.connection.clone();

    let created: i64 = self
      .create_script
      .key(self.keys.user_by_email(&user.email))
      .key(self.keys.user_by_id(user.id))
      .arg(payload)
      .arg(user.email.as_str())
      .invoke_async(&mut conn)
      .await?;

    if created == 0 {
      return Err(RepositoryError::DuplicateKey(format!(
        "email {} already registered",
        user.email
      )));
    }

    Ok(user)
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
    let mut conn = self.connection.clone();
    let email: Option<String> = conn.get(self.keys.user_by_id(id)).await?;

    match email {
      Some(email) => {
        self
          .load(&self.keys.user_by_email(&Email::from_stored(email)))
          .await
      }
      None => Ok(None),
    }
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    self.load(&self.keys.user_by_email(email)).await
  }

  async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
    let mut conn = self.connection.clone();
    let exists: bool = conn.exists(self.keys.user_by_email(email)).await?;
    Ok(exists)
  }
}
