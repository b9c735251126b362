use crate::domain::auth::value_objects::{Email, UserId};
use crate::domain::job::JobId;

/// Key layout shared by the Redis repositories
///
/// - `{prefix}:{users}:email:{email}` user JSON
/// - `{prefix}:{users}:id:{id}` email of that user
/// - `{prefix}:{jobs}:{owner}:{id}` job hash
/// - `{prefix}:{jobs}:{owner}` sorted set of job ids, scored by update time
#[derive(Debug, Clone)]
pub struct KeySpace {
  prefix: String,
  users: String,
  jobs: String,
}

impl KeySpace {
  pub fn new(prefix: &str, users: &str, jobs: &str) -> Self {
    Self {
      prefix: prefix.to_string(),
      users: users.to_string(),
      jobs: jobs.to_string(),
    }
  }

  pub fn user_by_email(&self, email: &Email) -> String {
    format!("{}:{}:email:{}", self.prefix, self.users, email.as_str())
  }

  pub fn user_by_id(&self, id: UserId) -> String {
    format!("{}:{}:id:{}", self.prefix, self.users, id)
  }

  pub fn job(&self, owner: UserId, id: &JobId) -> String {
    format!("{}:{}:{}:{}", self.prefix, self.jobs, owner, id)
  }

  pub fn job_index(&self, owner: UserId) -> String {
    format!("{}:{}:{}", self.prefix, self.jobs, owner)
  }
}
