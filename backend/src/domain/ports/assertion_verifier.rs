//! Port for validating third-party identity assertions.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while validating a federated identity assertion.
    pub enum AssertionError {
        /// The assertion could not be decoded.
        Malformed { message: String } => "identity assertion is malformed: {message}",
        /// Signature, audience, issuer, expiry or claim checks failed.
        Rejected { message: String } => "identity assertion rejected: {message}",
        /// The provider's signing keys could not be fetched.
        ProviderUnavailable { message: String } => "identity provider unavailable: {message}",
        /// Federated login is not configured for this deployment.
        Disabled => "federated login is disabled",
    }
}

/// Name and email vouched for by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub name: String,
    pub email: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssertionVerifier: Send + Sync {
    /// Validate `assertion` and return the identity it carries.
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, AssertionError>;
}

/// Verifier used when no provider audience is configured. Rejects everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAssertionVerifier;

#[async_trait]
impl AssertionVerifier for DisabledAssertionVerifier {
    async fn verify(&self, _assertion: &str) -> Result<VerifiedIdentity, AssertionError> {
        Err(AssertionError::disabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_verifier_rejects_everything() {
        let err = DisabledAssertionVerifier
            .verify("header.payload.signature")
            .await
            .expect_err("always rejects");
        assert_eq!(err, AssertionError::Disabled);
    }
}
