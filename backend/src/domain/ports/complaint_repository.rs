//! Port for complaint persistence.
//!
//! Every mutation is a single-record write. Adapters must implement
//! [`ComplaintRepository::confirm_resolved`] as a conditional update so a
//! confirmation can never land on a complaint that is no longer resolved.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Complaint, ComplaintFilter, ComplaintId, ComplaintStatus, ConfirmOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaint repository adapters.
    pub enum ComplaintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "complaint repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "complaint repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a newly submitted complaint.
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError>;

    /// Fetch a complaint by id.
    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// List complaints matching `filter`, newest first.
    async fn list(&self, filter: &ComplaintFilter)
    -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Overwrite status and remarks. Returns `None` when the id is unknown.
    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Set the confirmation flag if, and only if, the complaint is resolved.
    async fn confirm_resolved(
        &self,
        id: &ComplaintId,
        now: DateTime<Utc>,
    ) -> Result<ConfirmOutcome, ComplaintRepositoryError>;
}
