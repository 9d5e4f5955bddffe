//! Tests for the credential store.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockAccountRepository, MockPasswordHasher};

/// Deterministic stand-in for a real hasher.
struct TaggingHasher;

impl PasswordHasher for TaggingHasher {
    fn hash(&self, raw: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::from_encoded(format!("tagged${raw}")))
    }

    fn verify(&self, raw: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str() == format!("tagged${raw}"))
    }
}

fn email(raw: &str) -> Email {
    Email::new(raw).expect("valid email")
}

fn stored_account(raw_password: &str) -> Account {
    Account::new(
        AccountId::random(),
        DisplayName::new("Asha").expect("valid name"),
        email("asha@u.edu"),
        PasswordHash::from_encoded(format!("tagged${raw_password}")),
        Role::Student,
    )
}

#[fixture]
fn account() -> Account {
    stored_account("p@ss1234")
}

fn store_with(repo: MockAccountRepository) -> CredentialStore {
    CredentialStore::new(Arc::new(repo), Arc::new(TaggingHasher))
}

#[rstest]
#[tokio::test]
async fn create_stores_hash_not_raw_password() {
    let mut repo = MockAccountRepository::new();
    repo.expect_insert()
        .withf(|account| {
            account.password_hash().as_str() == "tagged$p@ss1234"
                && account.role() == Role::Admin
        })
        .times(1)
        .return_once(|_| Ok(()));

    let account = store_with(repo)
        .create(
            DisplayName::new("Bala").expect("valid"),
            email("bala@u.edu"),
            "p@ss1234",
            Role::Admin,
        )
        .await
        .expect("create succeeds");

    assert_ne!(account.password_hash().as_str(), "p@ss1234");
    assert_eq!(account.email().as_ref(), "bala@u.edu");
}

#[rstest]
#[tokio::test]
async fn create_maps_duplicate_email() {
    let mut repo = MockAccountRepository::new();
    repo.expect_insert()
        .return_once(|_| Err(AccountRepositoryError::duplicate_email("asha@u.edu")));

    let err = store_with(repo)
        .create(
            DisplayName::new("Asha").expect("valid"),
            email("asha@u.edu"),
            "pw",
            Role::Student,
        )
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::DuplicateIdentity);
}

#[rstest]
#[case("p@ss1234", true)]
#[case("p@ss12345", false)]
#[case("P@SS1234", false)]
#[case("", false)]
#[tokio::test]
async fn verify_password_accepts_only_exact_match(
    account: Account,
    #[case] attempt: &str,
    #[case] expected: bool,
) {
    let store = store_with(MockAccountRepository::new());
    let matched = store
        .verify_password(&account, attempt)
        .await
        .expect("verification runs");
    assert_eq!(matched, expected);
}

#[rstest]
#[case("p@ss1234", None)]
#[case("wrong", Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn authenticate_checks_password(
    account: Account,
    #[case] password: &str,
    #[case] expected_error: Option<ErrorCode>,
) {
    let expected_id = account.id();
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(account)));

    let creds = LoginCredentials::try_from_parts("asha@u.edu", password).expect("valid");
    let result = store_with(repo).authenticate(&creds).await;

    match expected_error {
        None => assert_eq!(result.expect("authenticated").id(), expected_id),
        Some(code) => {
            let err = result.expect_err("rejected");
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), INVALID_CREDENTIALS);
        }
    }
}

#[rstest]
#[tokio::test]
async fn unknown_email_still_runs_a_verification() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(PasswordHash::from_encoded("dummy")));
    hasher.expect_verify().times(1).returning(|_, _| Ok(false));

    let store = CredentialStore::new(Arc::new(repo), Arc::new(hasher));
    let creds = LoginCredentials::try_from_parts("ghost@u.edu", "pw").expect("valid");
    let err = store.authenticate(&creds).await.expect_err("unknown email");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[case(AccountRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(AccountRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn lookup_failures_are_mapped(
    #[case] failure: AccountRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_id().return_once(move |_| Err(failure));

    let err = store_with(repo)
        .find_by_id(&AccountId::random())
        .await
        .expect_err("lookup fails");
    assert_eq!(err.code(), expected);
}
