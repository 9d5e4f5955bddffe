//! Driving port for complaint mutations.

use async_trait::async_trait;

use crate::domain::{Account, Complaint, ComplaintId, ComplaintStatus, ComplaintSubmission, Error};

#[async_trait]
pub trait ComplaintCommand: Send + Sync {
    /// File a complaint owned by `actor`.
    async fn submit(
        &self,
        actor: &Account,
        submission: ComplaintSubmission,
    ) -> Result<Complaint, Error>;

    /// Admin-only: set status and replace remarks.
    async fn set_status(
        &self,
        actor: &Account,
        id: ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
    ) -> Result<Complaint, Error>;

    /// Owner-only: confirm a resolved complaint.
    async fn confirm(&self, actor: &Account, id: ComplaintId) -> Result<Complaint, Error>;
}
