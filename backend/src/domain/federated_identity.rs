//! Federated identity bridge.
//!
//! Exchanges a verified third-party assertion for a local account. Email
//! equality is the only linking rule: an existing account with the asserted
//! email is reused as-is, whatever its provenance. Unknown emails provision a
//! student account with an undisclosed random password.

use std::sync::Arc;

use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{info, warn};

use crate::domain::ports::{AssertionError, AssertionVerifier, VerifiedIdentity};
use crate::domain::{Account, CredentialStore, DisplayName, Email, Error, ErrorCode, Role};

/// Message returned for every rejected assertion.
pub const FEDERATED_AUTH_FAILED: &str = "federated authentication failed";

const PLACEHOLDER_PASSWORD_BYTES: usize = 32;

fn map_assertion_error(error: AssertionError) -> Error {
    match error {
        AssertionError::ProviderUnavailable { message } => {
            warn!(reason = %message, "identity provider unavailable");
            Error::service_unavailable("identity provider unavailable")
        }
        other => {
            warn!(reason = %other, "federated assertion rejected");
            Error::federated_auth_failure(FEDERATED_AUTH_FAILED)
        }
    }
}

fn placeholder_password() -> String {
    let mut bytes = [0_u8; PLACEHOLDER_PASSWORD_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Display name for a provisioned account: the asserted name, or the email's
/// local part when the provider supplied nothing usable.
fn provisioned_name(identity: &VerifiedIdentity, email: &Email) -> Result<DisplayName, Error> {
    DisplayName::new(&identity.name)
        .or_else(|_| {
            let local: String = email
                .as_ref()
                .split('@')
                .next()
                .unwrap_or_default()
                .chars()
                .take(crate::domain::account::DISPLAY_NAME_MAX)
                .collect();
            DisplayName::new(local)
        })
        .map_err(|_| Error::federated_auth_failure(FEDERATED_AUTH_FAILED))
}

#[derive(Clone)]
pub struct FederatedIdentityBridge {
    verifier: Arc<dyn AssertionVerifier>,
    credentials: CredentialStore,
}

impl FederatedIdentityBridge {
    pub fn new(verifier: Arc<dyn AssertionVerifier>, credentials: CredentialStore) -> Self {
        Self {
            verifier,
            credentials,
        }
    }

    /// Validate `assertion` and return the linked local account.
    pub async fn exchange_assertion(&self, assertion: &str) -> Result<Account, Error> {
        let identity = self
            .verifier
            .verify(assertion)
            .await
            .map_err(map_assertion_error)?;
        let email = Email::new(&identity.email).map_err(|err| {
            warn!(reason = %err, "asserted email unusable");
            Error::federated_auth_failure(FEDERATED_AUTH_FAILED)
        })?;

        if let Some(account) = self.credentials.find_by_email(&email).await? {
            return Ok(account);
        }

        let name = provisioned_name(&identity, &email)?;
        match self
            .credentials
            .create(name, email.clone(), &placeholder_password(), Role::Student)
            .await
        {
            Ok(account) => {
                info!(account_id = %account.id(), "provisioned account from federated login");
                Ok(account)
            }
            // A concurrent first login for the same email won the insert.
            Err(err) if err.code() == ErrorCode::DuplicateIdentity => self
                .credentials
                .find_by_email(&email)
                .await?
                .ok_or_else(|| Error::internal("federated account vanished after insert race")),
            Err(err) => Err(err),
        }
    }
}
