//! PostgreSQL-backed `AccountRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, DisplayName, Email, PasswordHash, Role};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, AccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_basic_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let id = row.id;
    let corrupt = |err: crate::domain::AccountValidationError| {
        AccountRepositoryError::query(format!("stored account {id} is invalid: {err}"))
    };
    let name = DisplayName::new(&row.name).map_err(corrupt)?;
    let email = Email::new(&row.email).map_err(corrupt)?;
    let role = row.role.parse::<Role>().map_err(corrupt)?;
    Ok(Account::new(
        AccountId::from_uuid(id),
        name,
        email,
        PasswordHash::from_encoded(row.password_hash),
        role,
    ))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAccountRow {
            id: *account.id().as_uuid(),
            name: account.name().as_ref(),
            email: account.email().as_ref(),
            password_hash: account.password_hash().as_str(),
            role: account.role().as_str(),
        };

        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AccountRepositoryError::duplicate_email(account.email().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        accounts::table
            .filter(accounts::id.eq(id.as_uuid()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        accounts::table
            .filter(accounts::id.eq_any(uuids))
            .select(AccountRow::as_select())
            .load::<AccountRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_account)
            .collect()
    }
}
