//! Status transitions and owner confirmation.
//!
//! Admins move a complaint between statuses through [`Complaint::apply_status`],
//! subject to a [`StatusTransitionPolicy`]. Owners confirm a resolved
//! complaint through [`Complaint::confirm`].

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use super::{Complaint, ComplaintStatus};

/// Rejections raised by lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// Confirmation requires a resolved complaint.
    NotResolved { status: ComplaintStatus },
    /// The active policy forbids moving between these statuses.
    TransitionRejected {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotResolved { status } => write!(
                f,
                "complaint can only be confirmed once resolved (status is {status})"
            ),
            Self::TransitionRejected { from, to } => {
                write!(f, "status change from {from} to {to} is not permitted")
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

/// Result of a confirmation attempt against stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The complaint is resolved and now confirmed.
    Confirmed(Complaint),
    /// The complaint exists but is not resolved.
    NotResolved(ComplaintStatus),
    /// No complaint has the requested id.
    NotFound,
}

/// Table of permitted `(from, to)` status changes.
///
/// The default policy permits every pair, so an admin may reopen a rejected
/// complaint or skip straight to resolved. A restrictive table can be built
/// with [`StatusTransitionPolicy::from_pairs`] without touching callers.
///
/// # Examples
/// ```
/// use hostelops::domain::{ComplaintStatus::*, StatusTransitionPolicy};
///
/// let strict = StatusTransitionPolicy::from_pairs([(Pending, InProgress), (InProgress, Resolved)]);
/// assert!(strict.permits(Pending, InProgress));
/// assert!(!strict.permits(Rejected, Pending));
/// assert!(StatusTransitionPolicy::permissive().permits(Rejected, Pending));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransitionPolicy {
    allowed: Option<HashSet<(ComplaintStatus, ComplaintStatus)>>,
}

impl StatusTransitionPolicy {
    /// Policy that allows any status to move to any other.
    pub fn permissive() -> Self {
        Self { allowed: None }
    }

    /// Policy that allows only the listed pairs. Re-applying the current
    /// status is always allowed so remarks can be edited in place.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (ComplaintStatus, ComplaintStatus)>,
    ) -> Self {
        Self {
            allowed: Some(pairs.into_iter().collect()),
        }
    }

    pub fn is_permissive(&self) -> bool {
        self.allowed.is_none()
    }

    pub fn permits(&self, from: ComplaintStatus, to: ComplaintStatus) -> bool {
        match &self.allowed {
            None => true,
            Some(pairs) => from == to || pairs.contains(&(from, to)),
        }
    }
}

impl Default for StatusTransitionPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}

impl Complaint {
    /// Set the status and replace the remarks. Empty remarks clear them.
    pub fn apply_status(
        &mut self,
        policy: &StatusTransitionPolicy,
        status: ComplaintStatus,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        if !policy.permits(self.status, status) {
            return Err(LifecycleError::TransitionRejected {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.admin_remarks = remarks.filter(|text| !text.is_empty());
        self.updated_at = now;
        Ok(())
    }

    /// Mark the complaint as confirmed by its owner.
    ///
    /// Returns `Ok(true)` when the flag flipped and `Ok(false)` when it was
    /// already set; the timestamp only moves in the first case.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<bool, LifecycleError> {
        if self.status != ComplaintStatus::Resolved {
            return Err(LifecycleError::NotResolved {
                status: self.status,
            });
        }
        if self.confirmed_by_owner {
            return Ok(false);
        }
        self.confirmed_by_owner = true;
        self.updated_at = now;
        Ok(true)
    }
}
