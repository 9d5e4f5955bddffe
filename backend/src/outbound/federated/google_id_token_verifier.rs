//! Google ID-token verification against the provider's published JWKS.
//!
//! The token header's `kid` selects the signing key. Keys are cached for
//! [`JWKS_CACHE_TTL`]. A `kid` missing from the cache triggers at most one
//! refetch per [`KID_REFETCH_INTERVAL`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use mockable::{Clock, DefaultClock};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::domain::ports::{AssertionError, AssertionVerifier, VerifiedIdentity};

pub const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];
pub const JWKS_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
pub const KID_REFETCH_INTERVAL: Duration = Duration::from_secs(5 * 60);
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmailVerified {
    Flag(bool),
    Text(String),
}

impl EmailVerified {
    fn is_true(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    email: Option<String>,
    email_verified: Option<EmailVerified>,
    name: Option<String>,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: DateTime<Utc>,
    /// Last fetch attempt, successful or not.
    attempted_at: DateTime<Utc>,
}

impl CachedKeys {
    fn new(keys: JwkSet, at: DateTime<Utc>) -> Self {
        Self {
            keys,
            fetched_at: at,
            attempted_at: at,
        }
    }

    fn lookup(&self, kid: &str, now: DateTime<Utc>) -> Lookup {
        if let Some(jwk) = self.keys.find(kid) {
            return Lookup::Hit(key_from_jwk(jwk));
        }
        if elapsed(self.fetched_at, now) >= JWKS_CACHE_TTL
            || elapsed(self.attempted_at, now) >= KID_REFETCH_INTERVAL
        {
            Lookup::Refetch
        } else {
            Lookup::Unknown
        }
    }
}

enum Lookup {
    Hit(Result<DecodingKey, AssertionError>),
    Unknown,
    Refetch,
}

/// Time since `at`; a clock that stepped backwards counts as no time.
fn elapsed(at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - at).to_std().unwrap_or(Duration::ZERO)
}

fn unknown_key(kid: &str) -> AssertionError {
    AssertionError::rejected(format!("unknown signing key {kid}"))
}

pub struct GoogleIdTokenVerifier {
    client_id: String,
    jwks_url: Url,
    http: reqwest::Client,
    clock: Arc<dyn Clock>,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleIdTokenVerifier {
    /// Verifier accepting tokens minted for `client_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::ProviderUnavailable`] when the HTTP client
    /// cannot be built.
    pub fn new(client_id: impl Into<String>, jwks_url: Url) -> Result<Self, AssertionError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|err| AssertionError::provider_unavailable(err.to_string()))?;
        Ok(Self {
            client_id: client_id.into(),
            jwks_url,
            http,
            clock: Arc::new(DefaultClock),
            cache: RwLock::new(None),
        })
    }

    /// Replace the clock used to age cached keys.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    /// Seed the key cache, e.g. with keys fetched out of band. The keys count
    /// as fetched now.
    pub fn with_key_set(self, keys: JwkSet) -> Self {
        let fetched_at = self.clock.utc();
        Self {
            cache: RwLock::new(Some(CachedKeys::new(keys, fetched_at))),
            ..self
        }
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AssertionError> {
        let now = self.clock.utc();
        match self.cache.read().await.as_ref().map(|cached| cached.lookup(kid, now)) {
            Some(Lookup::Hit(key)) => return key,
            Some(Lookup::Unknown) => return Err(unknown_key(kid)),
            Some(Lookup::Refetch) | None => {}
        }

        // Re-check under the write lock: a concurrent caller may have
        // refreshed the keys while this one waited.
        let mut cache = self.cache.write().await;
        match cache.as_ref().map(|cached| cached.lookup(kid, now)) {
            Some(Lookup::Hit(key)) => return key,
            Some(Lookup::Unknown) => return Err(unknown_key(kid)),
            Some(Lookup::Refetch) | None => {}
        }
        if let Some(cached) = cache.as_mut() {
            cached.attempted_at = now;
        }

        let keys = self.fetch_keys().await?;
        let key = keys
            .find(kid)
            .map(key_from_jwk)
            .unwrap_or_else(|| Err(unknown_key(kid)));
        *cache = Some(CachedKeys::new(keys, now));
        key
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AssertionError> {
        debug!(url = %self.jwks_url, "fetching identity provider signing keys");
        let response = self
            .http
            .get(self.jwks_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| {
                warn!(error = %err, "identity provider key fetch failed");
                AssertionError::provider_unavailable(err.to_string())
            })?;
        response
            .json::<JwkSet>()
            .await
            .map_err(|err| AssertionError::provider_unavailable(err.to_string()))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation
    }
}

fn key_from_jwk(jwk: &jsonwebtoken::jwk::Jwk) -> Result<DecodingKey, AssertionError> {
    DecodingKey::from_jwk(jwk).map_err(|err| AssertionError::rejected(err.to_string()))
}

#[async_trait]
impl AssertionVerifier for GoogleIdTokenVerifier {
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, AssertionError> {
        let header =
            decode_header(assertion).map_err(|err| AssertionError::malformed(err.to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(AssertionError::rejected(format!(
                "unexpected signing algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| AssertionError::malformed("token header has no key id"))?;
        let key = self.decoding_key(&kid).await?;

        let claims = decode::<GoogleClaims>(assertion, &key, &self.validation())
            .map_err(|err| AssertionError::rejected(err.to_string()))?
            .claims;

        if !claims.email_verified.as_ref().is_some_and(EmailVerified::is_true) {
            return Err(AssertionError::rejected("email is not verified"));
        }
        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| AssertionError::rejected("token carries no email"))?;
        let name = claims
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_default();
        Ok(VerifiedIdentity { name, email })
    }
}

#[cfg(test)]
#[path = "google_id_token_verifier_tests.rs"]
mod tests;
