//! Driving port for complaint listings.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Complaint, ComplaintFilter, Error};

/// Contact details of a complaint's owner shown to admins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: AccountId,
    pub name: String,
    pub email: String,
}

impl From<&Account> for OwnerSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
            email: account.email().to_string(),
        }
    }
}

/// A complaint paired with its owner's summary, when the owner still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintWithOwner {
    pub complaint: Complaint,
    pub owner: Option<OwnerSummary>,
}

#[async_trait]
pub trait ComplaintQuery: Send + Sync {
    /// Complaints owned by `actor`. Any owner in `filter` is overridden.
    async fn list_own(
        &self,
        actor: &Account,
        filter: ComplaintFilter,
    ) -> Result<Vec<Complaint>, Error>;

    /// Admin-only: every complaint matching `filter`, newest first.
    async fn list_all(
        &self,
        actor: &Account,
        filter: ComplaintFilter,
    ) -> Result<Vec<ComplaintWithOwner>, Error>;
}
