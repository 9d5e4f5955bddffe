//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountRepository, AssertionVerifier, AuthorizationGate, ComplaintCommand, ComplaintQuery,
    ComplaintRepository, IdentityCommand, PasswordHasher, TokenService,
};
use crate::domain::{
    ComplaintService, CredentialStore, FederatedIdentityBridge, IdentityService,
    RegistrationPolicy, StatusTransitionPolicy, TokenAuthorizationGate,
};

/// Parameter object bundling the driven adapters the use-cases run on.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountRepository>,
    pub complaints: Arc<dyn ComplaintRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub verifier: Arc<dyn AssertionVerifier>,
    pub clock: Arc<dyn Clock>,
    pub registration: RegistrationPolicy,
    pub transitions: StatusTransitionPolicy,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityCommand>,
    pub gate: Arc<dyn AuthorizationGate>,
    pub complaints: Arc<dyn ComplaintCommand>,
    pub complaints_query: Arc<dyn ComplaintQuery>,
}

impl HttpState {
    pub fn new(
        identity: Arc<dyn IdentityCommand>,
        gate: Arc<dyn AuthorizationGate>,
        complaints: Arc<dyn ComplaintCommand>,
        complaints_query: Arc<dyn ComplaintQuery>,
    ) -> Self {
        Self {
            identity,
            gate,
            complaints,
            complaints_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let credentials = CredentialStore::new(ports.accounts.clone(), ports.hasher);
        let federation = FederatedIdentityBridge::new(ports.verifier, credentials.clone());
        let identity = IdentityService::new(
            credentials.clone(),
            ports.tokens.clone(),
            federation,
            ports.registration,
        );
        let gate = TokenAuthorizationGate::new(ports.tokens, credentials);
        let complaints = Arc::new(
            ComplaintService::new(ports.complaints, ports.accounts, ports.clock)
                .with_policy(ports.transitions),
        );

        Self::new(
            Arc::new(identity),
            Arc::new(gate),
            complaints.clone(),
            complaints,
        )
    }
}
