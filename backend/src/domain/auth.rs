//! Authentication inputs: login credentials and registration requests.
//!
//! Handlers build these from raw strings before calling a driving port, so
//! the identity service only ever sees validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::account::{AccountValidationError, DisplayName, Email, Role};

/// Errors raised while building authentication inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthInputError {
    /// Password was empty.
    EmptyPassword,
    /// A name, email or role field failed validation.
    Account(AccountValidationError),
}

impl AuthInputError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPassword => "password",
            Self::Account(err) => err.field(),
        }
    }
}

impl fmt::Display for AuthInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::Account(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AuthInputError {}

impl From<AccountValidationError> for AuthInputError {
    fn from(value: AccountValidationError) -> Self {
        Self::Account(value)
    }
}

fn require_password(password: &str) -> Result<Zeroizing<String>, AuthInputError> {
    // Whitespace is significant in passwords; only emptiness is rejected.
    if password.is_empty() {
        return Err(AuthInputError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated email/password pair.
///
/// # Examples
/// ```
/// use hostelops::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("asha@u.edu", "p@ss1234").unwrap();
/// assert_eq!(creds.email().as_ref(), "asha@u.edu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthInputError> {
        Ok(Self {
            email: Email::new(email)?,
            password: require_password(password)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated self-registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: Email,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Build a registration; an absent role means [`Role::Student`].
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Self, AuthInputError> {
        let role = match role {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::default(),
        };
        Ok(Self {
            name: DisplayName::new(name)?,
            email: Email::new(email)?,
            password: require_password(password)?,
            role,
        })
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
