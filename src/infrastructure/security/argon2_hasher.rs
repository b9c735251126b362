use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::HashError;
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id password hasher implementation
///
/// Default parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 lane
///
/// Hashing runs on the blocking thread pool so request workers stay free.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, HashError> {
    Self::with_params(19456, 2, 1)
  }

  /// Builds a hasher with explicit cost parameters
  pub fn with_params(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, HashError> {
    let params = Params::new(memory_kib, iterations, lanes, Some(32)).map_err(|e| {
      HashError::HashingFailed(format!("Failed to create Argon2 params: {}", e))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();

    tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);

      argon2
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|e| HashError::HashingFailed(e.to_string()))
    })
    .await
    .map_err(|e| HashError::HashingFailed(format!("Hashing task failed: {}", e)))?
  }

  /// A mismatch is `Ok(false)`; only an unreadable digest is an error.
  /// `verify_password` compares in constant time.
  async fn verify(&self, password: &Password, digest: &PasswordHash) -> Result<bool, HashError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();
    let digest = digest.clone();

    tokio::task::spawn_blocking(move || {
      let parsed_hash =
        Argon2PasswordHash::new(digest.as_str()).map_err(|_| HashError::InvalidFormat)?;

      match argon2.verify_password(password.as_str().as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashError::VerificationFailed(e.to_string())),
      }
    })
    .await
    .map_err(|e| HashError::VerificationFailed(format!("Verification task failed: {}", e)))?
  }
}
