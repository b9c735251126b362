use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use super::documents::UserDocument;
use crate::domain::auth::{
  entities::User,
  ports::UserRepository,
  value_objects::{Email, UserId},
};
use crate::domain::errors::RepositoryError;

/// MongoDB implementation of the UserRepository trait
///
/// Email uniqueness comes from the unique index created at startup.
pub struct MongoUserRepository {
  users: Collection<UserDocument>,
}

impl MongoUserRepository {
  pub fn new(database: &Database, collection: &str) -> Self {
    Self {
      users: database.collection(collection),
    }
  }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    self.users.insert_one(UserDocument::from(&user)).await?;
    Ok(user)
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
    self
      .users
      .find_one(doc! { "_id": id.to_string() })
      .await?
      .map(User::try_from)
      .transpose()
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    self
      .users
      .find_one(doc! { "email": email.as_str() })
      .await?
      .map(User::try_from)
      .transpose()
  }

  async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
    let count = self
      .users
      .count_documents(doc! { "email": email.as_str() })
      .limit(1)
      .await?;

    Ok(count > 0)
  }
}
