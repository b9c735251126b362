use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{JobId, JobStatus};
use crate::domain::auth::UserId;
use crate::domain::errors::ValidationError;

/// A job application tracked by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
  pub id: JobId,
  /// Owning user; fixed at creation
  pub user_id: UserId,
  pub company: String,
  pub role: String,
  pub location: String,
  pub status: JobStatus,
  /// Refreshed only when the status actually changes
  pub status_updated_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<String>,
  pub created_at: DateTime<Utc>,
  /// Refreshed on every mutation
  pub updated_at: DateTime<Utc>,
}

impl Job {
  /// Creates a new job for `owner` from a validated draft
  pub fn new(owner: UserId, draft: JobDraft, now: DateTime<Utc>) -> Self {
    Self {
      id: JobId::generate(),
      user_id: owner,
      company: draft.company,
      role: draft.role,
      location: draft.location,
      status: draft.status,
      status_updated_at: now,
      link: draft.link,
      notes: draft.notes,
      source: draft.source,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Validated input for a new job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
  pub company: String,
  pub role: String,
  pub location: String,
  pub status: JobStatus,
  pub link: Option<String>,
  pub notes: Option<String>,
  pub source: Option<String>,
}

impl JobDraft {
  /// Trims every text field; company and role must remain non-empty.
  /// An absent or unrecognized status becomes `applied`.
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    company: &str,
    role: &str,
    location: Option<&str>,
    status: Option<&str>,
    link: Option<&str>,
    notes: Option<&str>,
    source: Option<&str>,
  ) -> Result<Self, ValidationError> {
    let company = company.trim();
    let role = role.trim();

    if company.is_empty() || role.is_empty() {
      return Err(ValidationError::MissingCompanyOrRole);
    }

    Ok(Self {
      company: company.to_string(),
      role: role.to_string(),
      location: location.map(str::trim).unwrap_or_default().to_string(),
      status: JobStatus::parse_or_default(status),
      link: optional_text(link),
      notes: optional_text(notes),
      source: optional_text(source),
    })
  }
}

/// Sparse update: `None` leaves a field untouched.
///
/// For the optional text fields, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobChanges {
  pub company: Option<String>,
  pub role: Option<String>,
  pub location: Option<String>,
  pub status: Option<JobStatus>,
  pub link: Option<Option<String>>,
  pub notes: Option<Option<String>>,
  pub source: Option<Option<String>>,
}

impl JobChanges {
  /// Builds a change set from raw request values.
  ///
  /// A provided status must be one of the allowed values; otherwise the whole
  /// change set is rejected.
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    company: Option<&str>,
    role: Option<&str>,
    location: Option<&str>,
    status: Option<&str>,
    link: Option<&str>,
    notes: Option<&str>,
    source: Option<&str>,
  ) -> Result<Self, ValidationError> {
    let status = status.map(str::parse::<JobStatus>).transpose()?;

    Ok(Self {
      company: company.map(|v| v.trim().to_string()),
      role: role.map(|v| v.trim().to_string()),
      location: location.map(|v| v.trim().to_string()),
      status,
      link: link.map(|v| optional_text(Some(v))),
      notes: notes.map(|v| optional_text(Some(v))),
      source: source.map(|v| optional_text(Some(v))),
    })
  }

  /// Applies the changes in place. `updated_at` is always refreshed;
  /// `status_updated_at` only when the status differs from the stored one.
  pub fn apply(&self, job: &mut Job, now: DateTime<Utc>) {
    if let Some(company) = &self.company {
      job.company = company.clone();
    }
    if let Some(role) = &self.role {
      job.role = role.clone();
    }
    if let Some(location) = &self.location {
      job.location = location.clone();
    }
    if let Some(status) = self.status {
      if status != job.status {
        job.status = status;
        job.status_updated_at = now;
      }
    }
    if let Some(link) = &self.link {
      job.link = link.clone();
    }
    if let Some(notes) = &self.notes {
      job.notes = notes.clone();
    }
    if let Some(source) = &self.source {
      job.source = source.clone();
    }

    job.updated_at = now;
  }
}

/// Trimmed text, with blank input treated as absent
fn optional_text(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}
