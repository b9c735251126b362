use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::auth::{
  entities::User,
  ports::UserRepository,
  value_objects::{Email, UserId},
};
use crate::domain::errors::RepositoryError;

/// Process-local user store keyed by normalized email
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let mut users = self.users.write().await;

    if users.contains_key(user.email.as_str()) {
      return Err(RepositoryError::DuplicateKey(format!(
        "email {} already registered",
        user.email
      )));
    }

    users.insert(user.email.as_str().to_string(), user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
    let users = self.users.read().await;
    Ok(users.values().find(|user| user.id == id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    let users = self.users.read().await;
    Ok(users.get(email.as_str()).cloned())
  }

  async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
    let users = self.users.read().await;
    Ok(users.contains_key(email.as_str()))
  }
}
