//! Identity service implementing the [`IdentityCommand`] driving port.
//!
//! Combines the credential store, the token service and the federated
//! identity bridge. Every successful path ends with a freshly issued token.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{AuthSession, IdentityCommand, TokenError, TokenService};
use crate::domain::{
    Account, CredentialStore, Error, FederatedIdentityBridge, LoginCredentials, Registration, Role,
};

/// Which roles self-registration may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPolicy {
    /// Registration may request any role.
    OpenRoles,
    /// Registration may only create students.
    StudentsOnly,
}

impl RegistrationPolicy {
    pub fn from_admin_toggle(allow_admin: bool) -> Self {
        if allow_admin {
            Self::OpenRoles
        } else {
            Self::StudentsOnly
        }
    }
}

#[derive(Clone)]
pub struct IdentityService {
    credentials: CredentialStore,
    tokens: Arc<dyn TokenService>,
    federation: FederatedIdentityBridge,
    registration: RegistrationPolicy,
}

impl IdentityService {
    pub fn new(
        credentials: CredentialStore,
        tokens: Arc<dyn TokenService>,
        federation: FederatedIdentityBridge,
        registration: RegistrationPolicy,
    ) -> Self {
        Self {
            credentials,
            tokens,
            federation,
            registration,
        }
    }

    fn session_for(&self, account: Account) -> Result<AuthSession, Error> {
        let token = self.tokens.issue(account.id()).map_err(|err| match err {
            TokenError::Signing { message } => {
                Error::internal(format!("token signing failed: {message}"))
            }
            other => Error::internal(other.to_string()),
        })?;
        Ok(AuthSession { account, token })
    }
}

#[async_trait]
impl IdentityCommand for IdentityService {
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        if registration.role() == Role::Admin
            && self.registration == RegistrationPolicy::StudentsOnly
        {
            return Err(Error::forbidden("self-registration cannot create admin accounts"));
        }
        let account = self
            .credentials
            .create(
                registration.name().clone(),
                registration.email().clone(),
                registration.password(),
                registration.role(),
            )
            .await?;
        info!(account_id = %account.id(), role = %account.role(), "account registered");
        self.session_for(account)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let account = self.credentials.authenticate(credentials).await?;
        self.session_for(account)
    }

    async fn federated_login(&self, assertion: &str) -> Result<AuthSession, Error> {
        let account = self.federation.exchange_assertion(assertion).await?;
        self.session_for(account)
    }
}
