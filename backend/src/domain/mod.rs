//! Domain primitives, services and ports.
//!
//! Purpose: define the account and complaint model, the identity and
//! lifecycle rules over it, and the ports through which adapters plug in.
//! Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Account, Complaint and their validated field types.
//! - CredentialStore, FederatedIdentityBridge, TokenAuthorizationGate,
//!   IdentityService, ComplaintService: the domain services.

pub mod account;
pub mod auth;
pub mod authorization;
pub mod complaint;
pub mod complaint_service;
pub mod credential_store;
pub mod error;
pub mod federated_identity;
pub mod identity_service;
pub mod ports;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, AccountValidationError, DisplayName, Email, PasswordHash, Role,
};
pub use self::auth::{AuthInputError, LoginCredentials, Registration};
pub use self::authorization::TokenAuthorizationGate;
pub use self::complaint::{
    Category, Complaint, ComplaintFilter, ComplaintId, ComplaintRecord, ComplaintStatus,
    ComplaintSubmission, ComplaintValidationError, ConfirmOutcome, LifecycleError, Priority,
    StatusTransitionPolicy,
};
pub use self::complaint_service::ComplaintService;
pub use self::credential_store::{CredentialStore, INVALID_CREDENTIALS};
pub use self::error::{Error, ErrorCode};
pub use self::federated_identity::{FEDERATED_AUTH_FAILED, FederatedIdentityBridge};
pub use self::identity_service::{IdentityService, RegistrationPolicy};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
