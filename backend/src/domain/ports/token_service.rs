//! Port for issuing and verifying bearer tokens.
//!
//! Tokens carry only the account id and an expiry. Role and name are always
//! re-read from the account store after verification.

use crate::domain::AccountId;

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenError {
        /// Signature, structure or subject is not acceptable.
        Invalid => "token is invalid",
        /// The embedded expiry has passed.
        Expired => "token has expired",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `account` valid for the configured lifetime.
    fn issue(&self, account: AccountId) -> Result<String, TokenError>;

    /// Verify `token` and return the account it was issued for.
    fn verify(&self, token: &str) -> Result<AccountId, TokenError>;
}
