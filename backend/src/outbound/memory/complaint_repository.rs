//! `ComplaintRepository` over a locked map.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{
    Complaint, ComplaintFilter, ComplaintId, ComplaintStatus, ConfirmOutcome, LifecycleError,
    StatusTransitionPolicy,
};

use super::poisoned;

#[derive(Debug, Default)]
pub struct InMemoryComplaintRepository {
    complaints: RwLock<HashMap<ComplaintId, Complaint>>,
}

impl InMemoryComplaintRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        self.complaints
            .write()
            .map_err(|_| poisoned(ComplaintRepositoryError::query))?
            .insert(complaint.id(), complaint.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        Ok(self
            .complaints
            .read()
            .map_err(|_| poisoned(ComplaintRepositoryError::query))?
            .get(id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let complaints = self
            .complaints
            .read()
            .map_err(|_| poisoned(ComplaintRepositoryError::query))?;
        let mut matching: Vec<Complaint> = complaints
            .values()
            .filter(|complaint| filter.matches(complaint))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(matching)
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut complaints = self
            .complaints
            .write()
            .map_err(|_| poisoned(ComplaintRepositoryError::query))?;
        let Some(complaint) = complaints.get_mut(id) else {
            return Ok(None);
        };
        // Transition rules are enforced by the service; storage accepts any.
        complaint
            .apply_status(&StatusTransitionPolicy::permissive(), status, remarks, now)
            .map_err(|err| ComplaintRepositoryError::query(err.to_string()))?;
        Ok(Some(complaint.clone()))
    }

    async fn confirm_resolved(
        &self,
        id: &ComplaintId,
        now: DateTime<Utc>,
    ) -> Result<ConfirmOutcome, ComplaintRepositoryError> {
        let mut complaints = self
            .complaints
            .write()
            .map_err(|_| poisoned(ComplaintRepositoryError::query))?;
        let Some(complaint) = complaints.get_mut(id) else {
            return Ok(ConfirmOutcome::NotFound);
        };
        Ok(match complaint.confirm(now) {
            Ok(_) => ConfirmOutcome::Confirmed(complaint.clone()),
            Err(LifecycleError::NotResolved { status }) => ConfirmOutcome::NotResolved(status),
            Err(other @ LifecycleError::TransitionRejected { .. }) => {
                return Err(ComplaintRepositoryError::query(other.to_string()));
            }
        })
    }
}
