//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`AuthorizationGate`]) are called by
//! inbound adapters. Driven ports (repositories, hasher, token service,
//! assertion verifier) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod assertion_verifier;
mod authorization_gate;
mod complaint_command;
mod complaint_query;
mod complaint_repository;
mod identity_command;
mod password_hasher;
mod token_service;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use assertion_verifier::MockAssertionVerifier;
pub use assertion_verifier::{
    AssertionError, AssertionVerifier, DisabledAssertionVerifier, VerifiedIdentity,
};
pub use authorization_gate::{AccessRequirement, AuthorizationGate};
pub use complaint_command::ComplaintCommand;
pub use complaint_query::{ComplaintQuery, ComplaintWithOwner, OwnerSummary};
#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintRepository, ComplaintRepositoryError};
pub use identity_command::{AuthSession, IdentityCommand};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
