pub mod auth;
pub mod errors;
pub mod job;

use chrono::{DateTime, SubsecRound, Utc};

pub use errors::{RepositoryError, ValidationError};

/// Current time truncated to millisecond precision, the finest resolution
/// every storage backend keeps.
pub fn current_timestamp() -> DateTime<Utc> {
  Utc::now().trunc_subsecs(3)
}
