//! Port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hash computation failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Derives and checks salted password hashes.
///
/// Implementations are CPU bound; callers run them off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `raw` with a fresh salt.
    fn hash(&self, raw: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `raw` against `hash` in constant time with respect to the
    /// password contents.
    fn verify(&self, raw: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
