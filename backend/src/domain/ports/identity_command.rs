//! Driving port for account registration and sign-in.
//!
//! Inbound adapters call this port to obtain a session for password or
//! federated sign-in without touching hashing, token or provider details.

use async_trait::async_trait;

use crate::domain::{Account, Error, LoginCredentials, Registration};

/// Signed-in account together with a freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account: Account,
    pub token: String,
}

#[async_trait]
pub trait IdentityCommand: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Verify an email/password pair.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;

    /// Exchange a third-party identity assertion for a local session.
    async fn federated_login(&self, assertion: &str) -> Result<AuthSession, Error>;
}
