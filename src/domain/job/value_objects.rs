use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::ValidationError;

// ============================================================================
// JobId Value Object
// ============================================================================

/// Opaque job identifier, unique within its owner's records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string())
  }

  /// Wraps an identifier taken from a request path or a stored record
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for JobId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ============================================================================
// JobStatus Value Object
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
  #[default]
  Applied,
  Interviewing,
  Offer,
  Rejected,
}

impl JobStatus {
  /// Case-insensitive match against the allowed values, ignoring surrounding
  /// whitespace
  pub fn parse(raw: &str) -> Option<Self> {
    match raw.trim().to_lowercase().as_str() {
      "applied" => Some(Self::Applied),
      "interviewing" => Some(Self::Interviewing),
      "offer" => Some(Self::Offer),
      "rejected" => Some(Self::Rejected),
      _ => None,
    }
  }

  /// Lenient form used on create: absent or unrecognized input becomes `Applied`
  pub fn parse_or_default(raw: Option<&str>) -> Self {
    raw.and_then(Self::parse).unwrap_or_default()
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Applied => "applied",
      Self::Interviewing => "interviewing",
      Self::Offer => "offer",
      Self::Rejected => "rejected",
    }
  }
}

impl FromStr for JobStatus {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s).ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
  }
}

impl fmt::Display for JobStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
