//! Credential store: account lookup, creation and password verification.
//!
//! Raw passwords never leave this module except as input to the hasher, and
//! hashing always runs on the blocking thread pool.

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, PasswordHashError, PasswordHasher,
};
use crate::domain::{
    Account, AccountId, DisplayName, Email, Error, LoginCredentials, PasswordHash, Role,
};

/// Message returned for every failed password login.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

const DUMMY_PASSWORD: &str = "hostelops-timing-equaliser";

pub(crate) fn map_account_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateEmail { .. } => {
            Error::duplicate_identity("an account with this email already exists")
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Account lookup, creation and password verification.
#[derive(Clone)]
pub struct CredentialStore {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    dummy_hash: Arc<OnceLock<PasswordHash>>,
}

impl CredentialStore {
    pub fn new(accounts: Arc<dyn AccountRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            accounts,
            hasher,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, Error> {
        self.accounts
            .find_by_email(email)
            .await
            .map_err(map_account_repository_error)
    }

    pub async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(map_account_repository_error)
    }

    pub async fn find_by_ids(&self, ids: &[AccountId]) -> Result<Vec<Account>, Error> {
        self.accounts
            .find_by_ids(ids)
            .await
            .map_err(map_account_repository_error)
    }

    /// Create an account, storing only a salted hash of `raw_password`.
    ///
    /// Fails with `duplicate_identity` when the email is already registered.
    pub async fn create(
        &self,
        name: DisplayName,
        email: Email,
        raw_password: &str,
        role: Role,
    ) -> Result<Account, Error> {
        let raw = Zeroizing::new(raw_password.to_owned());
        let hash = self
            .with_hasher(move |hasher| hasher.hash(raw.as_str()))
            .await?;
        let account = Account::new(AccountId::random(), name, email, hash, role);
        self.accounts
            .insert(&account)
            .await
            .map_err(map_account_repository_error)?;
        Ok(account)
    }

    /// Whether `raw_password` matches the account's stored hash.
    pub async fn verify_password(&self, account: &Account, raw_password: &str) -> Result<bool, Error> {
        let raw = Zeroizing::new(raw_password.to_owned());
        let hash = account.password_hash().clone();
        self.with_hasher(move |hasher| hasher.verify(raw.as_str(), &hash))
            .await
    }

    /// Resolve credentials to an account.
    ///
    /// Unknown emails and wrong passwords fail identically. For unknown
    /// emails a throwaway verification still runs so both paths cost the
    /// same.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Account, Error> {
        let Some(account) = self.find_by_email(credentials.email()).await? else {
            self.burn_verification(credentials.password()).await;
            warn!("password login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if self.verify_password(&account, credentials.password()).await? {
            Ok(account)
        } else {
            warn!(account_id = %account.id(), "password login rejected");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }

    async fn burn_verification(&self, raw_password: &str) {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash.clone(),
            None => match self.with_hasher(|hasher| hasher.hash(DUMMY_PASSWORD)).await {
                Ok(hash) => self.dummy_hash.get_or_init(|| hash).clone(),
                Err(error) => {
                    debug!(error = %error, "dummy hash unavailable");
                    return;
                }
            },
        };
        let raw = Zeroizing::new(raw_password.to_owned());
        if let Err(error) = self
            .with_hasher(move |hasher| hasher.verify(raw.as_str(), &hash))
            .await
        {
            debug!(error = %error, "dummy verification failed");
        }
    }

    async fn with_hasher<T, F>(&self, work: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PasswordHasher) -> Result<T, PasswordHashError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || work(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[cfg(test)]
#[path = "credential_store_tests.rs"]
mod tests;
