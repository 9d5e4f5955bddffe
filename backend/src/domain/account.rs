//! Account data model.
//!
//! Accounts are created by registration or first federated login and are
//! never edited afterwards. The role is fixed at creation time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum number of characters accepted in a display name.
pub const DISPLAY_NAME_MAX: usize = 64;
/// Maximum length of an email address in bytes.
pub const EMAIL_MAX: usize = 254;

/// Validation errors for account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
    InvalidEmail,
    EmailTooLong { max: usize },
    UnknownRole,
}

impl AccountValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyDisplayName | Self::DisplayNameTooLong { .. } => "name",
            Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::UnknownRole => "role",
        }
    }
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} bytes"),
            Self::UnknownRole => write!(f, "role must be one of student, admin"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Human readable account name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name.
    ///
    /// # Examples
    /// ```
    /// use hostelops::domain::DisplayName;
    ///
    /// let name = DisplayName::new("  Asha ").unwrap();
    /// assert_eq!(name.as_ref(), "Asha");
    /// assert!(DisplayName::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address used as the login identifier.
///
/// Comparison is exact: the address is stored as given (minus surrounding
/// whitespace) and `Asha@u.edu` and `asha@u.edu` are distinct accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.len() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AccountValidationError::InvalidEmail);
        };
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse permission class attached to an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccountValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            _ => Err(AccountValidationError::UnknownRole),
        }
    }
}

/// Salted one-way password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A registered account.
///
/// ## Invariants
/// - `email` is unique across all accounts (enforced by the repository).
/// - `password_hash` never holds a raw password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    name: DisplayName,
    email: Email,
    password_hash: PasswordHash,
    role: Role,
}

impl Account {
    pub fn new(
        id: AccountId,
        name: DisplayName,
        email: Email,
        password_hash: PasswordHash,
        role: Role,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            role,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether this account carries the elevated role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("asha@u.edu")]
    #[case("  Asha.K@Hostel.example  ")]
    #[case("a@b")]
    fn accepts_plausible_emails(#[case] raw: &str) {
        let email = Email::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("", AccountValidationError::InvalidEmail)]
    #[case("no-at-sign", AccountValidationError::InvalidEmail)]
    #[case("@u.edu", AccountValidationError::InvalidEmail)]
    #[case("asha@", AccountValidationError::InvalidEmail)]
    #[case("a@b@c", AccountValidationError::InvalidEmail)]
    #[case("as ha@u.edu", AccountValidationError::InvalidEmail)]
    fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: AccountValidationError) {
        assert_eq!(Email::new(raw).expect_err("invalid email"), expected);
    }

    #[rstest]
    fn rejects_overlong_email() {
        let raw = format!("{}@u.edu", "a".repeat(EMAIL_MAX));
        assert_eq!(
            Email::new(raw).expect_err("too long"),
            AccountValidationError::EmailTooLong { max: EMAIL_MAX }
        );
    }

    #[rstest]
    fn email_case_is_preserved() {
        let upper = Email::new("Asha@u.edu").expect("valid");
        let lower = Email::new("asha@u.edu").expect("valid");
        assert_ne!(upper, lower);
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyDisplayName)]
    #[case("    ", AccountValidationError::EmptyDisplayName)]
    fn rejects_blank_names(#[case] raw: &str, #[case] expected: AccountValidationError) {
        assert_eq!(DisplayName::new(raw).expect_err("blank"), expected);
    }

    #[rstest]
    fn rejects_overlong_name() {
        let err = DisplayName::new("x".repeat(DISPLAY_NAME_MAX + 1)).expect_err("too long");
        assert_eq!(err.field(), "name");
    }

    #[rstest]
    #[case("student", Role::Student)]
    #[case("admin", Role::Admin)]
    fn role_round_trips_through_str(#[case] raw: &str, #[case] role: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), role);
        assert_eq!(role.as_str(), raw);
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        assert_eq!(
            "superuser".parse::<Role>().expect_err("unknown"),
            AccountValidationError::UnknownRole
        );
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::from_encoded("$argon2id$v=19$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
