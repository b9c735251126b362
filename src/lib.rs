pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support {
  use std::sync::Arc;

  use chrono::Duration;

  use crate::domain::auth::AuthService;
  use crate::domain::job::JobService;
  use crate::infrastructure::persistence::memory::{InMemoryJobRepository, InMemoryUserRepository};
  use crate::infrastructure::security::{Argon2PasswordHasher, JwtTokenService};

  pub const TEST_SECRET: &str = "application-test-secret";

  /// Auth service on the memory store with a cheap hasher
  pub fn auth_service() -> Arc<AuthService> {
    Arc::new(AuthService::new(
      Arc::new(InMemoryUserRepository::new()),
      Arc::new(Argon2PasswordHasher::with_params(4096, 1, 1).unwrap()),
      Arc::new(JwtTokenService::new(Some(TEST_SECRET), Duration::minutes(60))),
    ))
  }

  pub fn job_service() -> Arc<JobService> {
    Arc::new(JobService::new(Arc::new(InMemoryJobRepository::new())))
  }
}
