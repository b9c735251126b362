use chrono::{DateTime, Utc};

use super::value_objects::{DisplayName, Email, PasswordHash, UserId};

/// User entity representing an account in the system
#[derive(Debug, Clone)]
pub struct User {
  /// Unique identifier for the user
  pub id: UserId,
  /// User's display name
  pub name: String,
  /// Normalized email address (unique)
  pub email: Email,
  /// Argon2id digest of the password; never leaves the service
  pub password_hash: PasswordHash,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with a fresh identifier
  pub fn new(
    name: DisplayName,
    email: Email,
    password_hash: PasswordHash,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      id: UserId::generate(),
      name: name.into_inner(),
      email,
      password_hash,
      created_at: now,
      updated_at: now,
    }
  }

  /// Public projection handed to callers
  pub fn profile(&self) -> UserProfile {
    UserProfile {
      id: self.id,
      name: self.name.clone(),
      email: self.email.as_str().to_string(),
    }
  }
}

/// The part of a user that may be shown to the outside world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
  pub id: UserId,
  pub name: String,
  pub email: String,
}

/// Verified identity carried by a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub user_id: UserId,
  pub email: String,
}

/// A freshly signed token together with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_profile_omits_password_hash() {
    let now = Utc::now();
    let user = User::new(
      DisplayName::new("Grace").unwrap(),
      Email::new("grace@example.com").unwrap(),
      PasswordHash::new("$argon2id$hash"),
      now,
    );

    let profile = user.profile();
    assert_eq!(profile.id, user.id);
    assert_eq!(profile.name, "Grace");
    assert_eq!(profile.email, "grace@example.com");
    assert_eq!(user.created_at, user.updated_at);
  }
}
