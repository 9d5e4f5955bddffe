//! Complaint lifecycle service.
//!
//! Implements the complaint driving ports on top of the complaint and account
//! repositories. Role and ownership checks happen here as well as at the
//! gate, so the rules hold for any inbound adapter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::credential_store::map_account_repository_error;
use crate::domain::ports::{
    AccountRepository, ComplaintCommand, ComplaintQuery, ComplaintRepository,
    ComplaintRepositoryError, ComplaintWithOwner, OwnerSummary,
};
use crate::domain::{
    Account, Complaint, ComplaintFilter, ComplaintId, ComplaintStatus, ComplaintSubmission,
    ConfirmOutcome, Error, LifecycleError, StatusTransitionPolicy,
};

fn map_repository_error(error: ComplaintRepositoryError) -> Error {
    match error {
        ComplaintRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("complaint repository unavailable: {message}"))
        }
        ComplaintRepositoryError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
    }
}

fn not_found(id: ComplaintId) -> Error {
    Error::not_found(format!("complaint {id} not found"))
}

fn require_admin(actor: &Account) -> Result<(), Error> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(Error::forbidden("admin role required"))
    }
}

#[derive(Clone)]
pub struct ComplaintService {
    complaints: Arc<dyn ComplaintRepository>,
    accounts: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
    policy: StatusTransitionPolicy,
}

impl ComplaintService {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        accounts: Arc<dyn AccountRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            complaints,
            accounts,
            clock,
            policy: StatusTransitionPolicy::permissive(),
        }
    }

    /// Replace the default permissive transition table.
    pub fn with_policy(mut self, policy: StatusTransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn find(&self, id: ComplaintId) -> Result<Complaint, Error> {
        self.complaints
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl ComplaintCommand for ComplaintService {
    async fn submit(
        &self,
        actor: &Account,
        submission: ComplaintSubmission,
    ) -> Result<Complaint, Error> {
        let complaint = Complaint::submit(
            ComplaintId::random(),
            actor.id(),
            submission,
            self.clock.utc(),
        );
        self.complaints
            .insert(&complaint)
            .await
            .map_err(map_repository_error)?;
        info!(complaint_id = %complaint.id(), owner = %actor.id(), "complaint submitted");
        Ok(complaint)
    }

    async fn set_status(
        &self,
        actor: &Account,
        id: ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
    ) -> Result<Complaint, Error> {
        require_admin(actor)?;

        if !self.policy.is_permissive() {
            let current = self.find(id).await?;
            if !self.policy.permits(current.status(), status) {
                let rejection = LifecycleError::TransitionRejected {
                    from: current.status(),
                    to: status,
                };
                return Err(Error::invalid_transition(rejection.to_string()));
            }
        }

        let updated = self
            .complaints
            .update_status(&id, status, remarks, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;
        info!(
            complaint_id = %id,
            admin = %actor.id(),
            status = %updated.status(),
            "complaint status updated"
        );
        Ok(updated)
    }

    async fn confirm(&self, actor: &Account, id: ComplaintId) -> Result<Complaint, Error> {
        let current = self.find(id).await?;
        if !current.is_owned_by(actor.id()) {
            return Err(Error::forbidden("only the owner may confirm a complaint"));
        }

        match self
            .complaints
            .confirm_resolved(&id, self.clock.utc())
            .await
            .map_err(map_repository_error)?
        {
            ConfirmOutcome::Confirmed(complaint) => Ok(complaint),
            ConfirmOutcome::NotResolved(status) => Err(Error::invalid_transition(
                LifecycleError::NotResolved { status }.to_string(),
            )),
            ConfirmOutcome::NotFound => Err(not_found(id)),
        }
    }
}

#[async_trait]
impl ComplaintQuery for ComplaintService {
    async fn list_own(
        &self,
        actor: &Account,
        filter: ComplaintFilter,
    ) -> Result<Vec<Complaint>, Error> {
        self.complaints
            .list(&filter.owned_by(actor.id()))
            .await
            .map_err(map_repository_error)
    }

    async fn list_all(
        &self,
        actor: &Account,
        filter: ComplaintFilter,
    ) -> Result<Vec<ComplaintWithOwner>, Error> {
        require_admin(actor)?;
        let complaints = self
            .complaints
            .list(&filter)
            .await
            .map_err(map_repository_error)?;

        let mut owner_ids: Vec<_> = complaints.iter().map(Complaint::owner).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners: HashMap<_, _> = self
            .accounts
            .find_by_ids(&owner_ids)
            .await
            .map_err(map_account_repository_error)?
            .iter()
            .map(|account| (account.id(), OwnerSummary::from(account)))
            .collect();

        Ok(complaints
            .into_iter()
            .map(|complaint| ComplaintWithOwner {
                owner: owners.get(&complaint.owner()).cloned(),
                complaint,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "complaint_service_tests.rs"]
mod tests;
