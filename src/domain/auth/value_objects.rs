use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::errors::ValidationError;

// ============================================================================
// UserId Value Object
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
  /// Generates a fresh random identifier
  pub fn generate() -> Self {
    Self(Uuid::new_v4())
  }

  /// Parses an identifier from its textual form
  pub fn parse(value: &str) -> Result<Self, uuid::Error> {
    Uuid::parse_str(value).map(Self)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for UserId {
  fn from(value: Uuid) -> Self {
    Self(value)
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Email Value Object
// ============================================================================

/// Normalized email address: trimmed and lowercased
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
  /// Normalizes the raw input; an empty result is a missing field
  pub fn new(email: impl AsRef<str>) -> Result<Self, ValidationError> {
    let normalized = email.as_ref().trim().to_lowercase();

    if normalized.is_empty() {
      return Err(ValidationError::MissingField { field: "email" });
    }

    Ok(Self(normalized))
  }

  /// Wraps an address that was normalized before it was stored
  pub fn from_stored(email: String) -> Self {
    Self(email)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// DisplayName Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
  pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
    let trimmed = name.as_ref().trim();

    if trimmed.is_empty() {
      return Err(ValidationError::MissingField { field: "name" });
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub const MIN_LENGTH: usize = 8;

  /// Accepts any non-empty password; strength is checked separately at signup
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    let password = password.into();

    if password.is_empty() {
      return Err(ValidationError::MissingField { field: "password" });
    }

    Ok(Self(password))
  }

  /// Length is counted in bytes
  pub fn ensure_min_length(&self) -> Result<(), ValidationError> {
    if self.0.len() < Self::MIN_LENGTH {
      return Err(ValidationError::PasswordTooShort {
        min: Self::MIN_LENGTH,
      });
    }

    Ok(())
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (PHC string)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
  pub fn new(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PasswordHash(***)")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_is_trimmed_and_lowercased() {
    let email = Email::new("  Jane.Doe@Example.COM \n").unwrap();
    assert_eq!(email.as_str(), "jane.doe@example.com");
  }

  #[test]
  fn test_blank_email_is_missing() {
    assert_eq!(
      Email::new("   ").unwrap_err(),
      ValidationError::MissingField { field: "email" }
    );
  }

  #[test]
  fn test_display_name_is_trimmed() {
    assert_eq!(DisplayName::new("  Ada  ").unwrap().as_str(), "Ada");
    assert!(DisplayName::new("\t").is_err());
  }

  #[test]
  fn test_password_rules() {
    assert!(Password::new("").is_err());

    let short = Password::new("seven77").unwrap();
    assert_eq!(
      short.ensure_min_length().unwrap_err(),
      ValidationError::PasswordTooShort { min: 8 }
    );

    let ok = Password::new("eight888").unwrap();
    assert!(ok.ensure_min_length().is_ok());
  }

  #[test]
  fn test_secrets_are_not_debug_printed() {
    let password = Password::new("hunter2hunter2").unwrap();
    let hash = PasswordHash::new("$argon2id$v=19$secret");
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(format!("{:?}", hash), "PasswordHash(***)");
  }

  #[test]
  fn test_user_id_round_trips_through_text() {
    let id = UserId::generate();
    assert_eq!(UserId::parse(&id.to_string()).unwrap(), id);
    assert!(UserId::parse("not-a-uuid").is_err());
  }
}
