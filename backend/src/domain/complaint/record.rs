//! Complaint entity, submission input and list filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AccountId;

use super::{
    Category, ComplaintStatus, ComplaintValidationError, DESCRIPTION_MAX, IMAGE_URL_MAX, Priority,
    TITLE_MAX,
};

/// Stable complaint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(Uuid);

impl ComplaintId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ComplaintId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Validated input for filing a new complaint.
///
/// # Examples
/// ```
/// use hostelops::domain::{Category, ComplaintSubmission, Priority};
///
/// let submission =
///     ComplaintSubmission::try_from_parts("Leaky tap", "Drips all night", "Plumbing", None, None)
///         .unwrap();
/// assert_eq!(submission.category(), Category::Plumbing);
/// assert_eq!(submission.priority(), Priority::Medium);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintSubmission {
    title: String,
    description: String,
    category: Category,
    priority: Priority,
    image_url: Option<String>,
}

impl ComplaintSubmission {
    /// Parse raw request values. A missing priority means [`Priority::Medium`];
    /// a blank image reference is treated as absent.
    pub fn try_from_parts(
        title: &str,
        description: &str,
        category: &str,
        priority: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Self, ComplaintValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ComplaintValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(ComplaintValidationError::TitleTooLong { max: TITLE_MAX });
        }

        let description = description.trim();
        if description.is_empty() {
            return Err(ComplaintValidationError::EmptyDescription);
        }
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(ComplaintValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }

        let category = category.parse::<Category>()?;
        let priority = priority
            .map(str::parse::<Priority>)
            .transpose()?
            .unwrap_or_default();

        let image_url = image_url.map(str::trim).filter(|url| !url.is_empty());
        if image_url.is_some_and(|url| url.len() > IMAGE_URL_MAX) {
            return Err(ComplaintValidationError::ImageUrlTooLong { max: IMAGE_URL_MAX });
        }

        Ok(Self {
            title: title.to_owned(),
            description: description.to_owned(),
            category,
            priority,
            image_url: image_url.map(str::to_owned),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Stored field set used by persistence adapters to rehydrate a complaint.
#[derive(Debug, Clone)]
pub struct ComplaintRecord {
    pub id: ComplaintId,
    pub owner: AccountId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub admin_remarks: Option<String>,
    pub image_url: Option<String>,
    pub confirmed_by_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A maintenance complaint.
///
/// ## Invariants
/// - `owner` is set at submission and never changes.
/// - `confirmed_by_owner` only becomes true while `status` is
///   [`ComplaintStatus::Resolved`] and is never reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    pub(super) id: ComplaintId,
    pub(super) owner: AccountId,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) category: Category,
    pub(super) priority: Priority,
    pub(super) status: ComplaintStatus,
    pub(super) admin_remarks: Option<String>,
    pub(super) image_url: Option<String>,
    pub(super) confirmed_by_owner: bool,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl Complaint {
    /// File a new complaint owned by `owner` in state `(Pending, unconfirmed)`.
    pub fn submit(
        id: ComplaintId,
        owner: AccountId,
        submission: ComplaintSubmission,
        now: DateTime<Utc>,
    ) -> Self {
        let ComplaintSubmission {
            title,
            description,
            category,
            priority,
            image_url,
        } = submission;
        Self {
            id,
            owner,
            title,
            description,
            category,
            priority,
            status: ComplaintStatus::Pending,
            admin_remarks: None,
            image_url,
            confirmed_by_owner: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a complaint from stored fields.
    pub fn from_record(record: ComplaintRecord) -> Self {
        Self {
            id: record.id,
            owner: record.owner,
            title: record.title,
            description: record.description,
            category: record.category,
            priority: record.priority,
            status: record.status,
            admin_remarks: record.admin_remarks,
            image_url: record.image_url,
            confirmed_by_owner: record.confirmed_by_owner,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn id(&self) -> ComplaintId {
        self.id
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn is_owned_by(&self, account: AccountId) -> bool {
        self.owner == account
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> ComplaintStatus {
        self.status
    }

    pub fn admin_remarks(&self) -> Option<&str> {
        self.admin_remarks.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn is_confirmed_by_owner(&self) -> bool {
        self.confirmed_by_owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Exact-match filters for complaint listings.
///
/// Every set field must match; unset fields match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub owner: Option<AccountId>,
    pub status: Option<ComplaintStatus>,
    pub category: Option<Category>,
}

impl ComplaintFilter {
    /// Restrict to complaints owned by `owner`, replacing any previous owner.
    pub fn owned_by(mut self, owner: AccountId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.owner.is_none_or(|owner| complaint.owner == owner)
            && self.status.is_none_or(|status| complaint.status == status)
            && self
                .category
                .is_none_or(|category| complaint.category == category)
    }
}
