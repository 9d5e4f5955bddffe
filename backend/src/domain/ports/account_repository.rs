//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Email};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Insert collided with an existing email.
        DuplicateEmail { email: String } => "an account with email {email} already exists",
    }
}

/// Storage for [`Account`] records. Email uniqueness is enforced here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account, failing with `DuplicateEmail` on collision.
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Look up an account by its exact email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountRepositoryError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch every account whose id is listed. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountRepositoryError>;
}
