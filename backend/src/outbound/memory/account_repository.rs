//! `AccountRepository` over a locked map.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, Email};

use super::poisoned;

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| poisoned(AccountRepositoryError::query))?;
        if accounts
            .values()
            .any(|existing| existing.email() == account.email())
        {
            return Err(AccountRepositoryError::duplicate_email(
                account.email().as_ref(),
            ));
        }
        accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| poisoned(AccountRepositoryError::query))?;
        Ok(accounts
            .values()
            .find(|account| account.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| poisoned(AccountRepositoryError::query))?;
        Ok(accounts.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountRepositoryError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| poisoned(AccountRepositoryError::query))?;
        Ok(ids.iter().filter_map(|id| accounts.get(id).cloned()).collect())
    }
}
