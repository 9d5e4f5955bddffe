//! Driving port that resolves a bearer token to an account.

use async_trait::async_trait;

use crate::domain::{Account, Error};

/// Privilege an operation demands from its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Any signed-in account.
    Authenticated,
    /// Only accounts holding the admin role.
    Admin,
}

#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    /// Resolve `bearer` (the raw token, if any) and enforce `requirement`.
    ///
    /// Missing, invalid and expired tokens, as well as tokens for accounts
    /// that no longer exist, all fail with `unauthorized`. A valid token
    /// lacking the required role fails with `forbidden`.
    async fn authorize(
        &self,
        bearer: Option<&str>,
        requirement: AccessRequirement,
    ) -> Result<Account, Error>;
}
