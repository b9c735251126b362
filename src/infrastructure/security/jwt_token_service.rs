use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::auth::entities::{Identity, IssuedToken};
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::ports::TokenService;
use crate::domain::auth::value_objects::{Email, UserId};
use crate::infrastructure::config::AuthConfig;

/// HMAC algorithms a token may declare
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  sub: String,
  email: String,
  iat: i64,
  exp: i64,
}

struct Keys {
  encoding: EncodingKey,
  decoding: DecodingKey,
}

/// Issues and verifies HS256 identity tokens
///
/// Without a secret every call fails with `TokenError::Unconfigured`; no token
/// is ever accepted unsigned.
pub struct JwtTokenService {
  keys: Option<Keys>,
  ttl: Duration,
  validation: Validation,
}

impl JwtTokenService {
  pub fn new(secret: Option<&str>, ttl: Duration) -> Self {
    let keys = secret
      .filter(|secret| !secret.trim().is_empty())
      .map(|secret| Keys {
        encoding: EncodingKey::from_secret(secret.as_bytes()),
        decoding: DecodingKey::from_secret(secret.as_bytes()),
      });

    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Self {
      keys,
      ttl,
      validation,
    }
  }

  pub fn from_config(config: &AuthConfig) -> Self {
    Self::new(config.signing_secret(), config.token_ttl())
  }
}

impl TokenService for JwtTokenService {
  fn issue(&self, user_id: UserId, email: &Email) -> Result<IssuedToken, TokenError> {
    let keys = self.keys.as_ref().ok_or(TokenError::Unconfigured)?;

    let issued_at = Utc::now();
    let expires_at = issued_at
      .checked_add_signed(self.ttl)
      .ok_or_else(|| TokenError::SigningFailed("token expiry is out of range".to_string()))?;

    let claims = Claims {
      sub: user_id.to_string(),
      email: email.as_str().to_string(),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
      .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

    Ok(IssuedToken { token, expires_at })
  }

  fn verify(&self, token: &str) -> Result<Identity, TokenError> {
    let keys = self.keys.as_ref().ok_or(TokenError::Unconfigured)?;

    // Reject other algorithm families before touching the signature
    let header = jsonwebtoken::decode_header(token).map_err(|_| TokenError::Malformed)?;
    if !ACCEPTED_ALGORITHMS.contains(&header.alg) {
      return Err(TokenError::WrongAlgorithm);
    }

    let data = jsonwebtoken::decode::<Claims>(token, &keys.decoding, &self.validation)?;

    let user_id = UserId::parse(&data.claims.sub).map_err(|_| TokenError::Malformed)?;

    Ok(Identity {
      user_id,
      email: data.claims.email,
    })
  }

  fn is_configured(&self) -> bool {
    self.keys.is_some()
  }
}
