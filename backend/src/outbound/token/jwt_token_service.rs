//! HS256 JWT implementation of the `TokenService` port.
//!
//! Claims are `{sub, iat, exp}` with `sub` the account UUID. Expiry is checked
//! against the injected clock rather than the system time so lifetimes can be
//! exercised in tests.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AccountId;
use crate::domain::ports::{TokenError, TokenService};

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME: Duration = Duration::hours(24);
/// Minimum signing secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service signing with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when the secret is shorter than
    /// [`MIN_SECRET_LEN`].
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::signing(format!(
                "signing secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            lifetime: TOKEN_LIFETIME,
            clock,
        })
    }

    /// Override the token lifetime.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, account: AccountId) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: account.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::invalid())?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::expired());
        }
        Uuid::parse_str(&data.claims.sub)
            .map(AccountId::from_uuid)
            .map_err(|_| TokenError::invalid())
    }
}
