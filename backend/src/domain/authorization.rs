//! Bearer-token authorization gate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{AccessRequirement, AuthorizationGate, TokenError, TokenService};
use crate::domain::{Account, CredentialStore, Error};

const NOT_AUTHENTICATED: &str = "authentication required";

/// Resolves a bearer token through the token service and the credential
/// store, then enforces the requested role. Reads only; never writes.
#[derive(Clone)]
pub struct TokenAuthorizationGate {
    tokens: Arc<dyn TokenService>,
    credentials: CredentialStore,
}

impl TokenAuthorizationGate {
    pub fn new(tokens: Arc<dyn TokenService>, credentials: CredentialStore) -> Self {
        Self {
            tokens,
            credentials,
        }
    }
}

#[async_trait]
impl AuthorizationGate for TokenAuthorizationGate {
    async fn authorize(
        &self,
        bearer: Option<&str>,
        requirement: AccessRequirement,
    ) -> Result<Account, Error> {
        let token = bearer
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::unauthorized(NOT_AUTHENTICATED))?;

        let account_id = self.tokens.verify(token).map_err(|err| {
            match err {
                TokenError::Expired => warn!("expired bearer token presented"),
                _ => warn!("invalid bearer token presented"),
            }
            Error::unauthorized(NOT_AUTHENTICATED)
        })?;

        let account = self
            .credentials
            .find_by_id(&account_id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account_id, "token refers to a missing account");
                Error::unauthorized(NOT_AUTHENTICATED)
            })?;

        if requirement == AccessRequirement::Admin && !account.is_admin() {
            return Err(Error::forbidden("admin role required"));
        }
        Ok(account)
    }
}
