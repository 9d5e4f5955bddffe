//! Response payloads shared by the HTTP handlers.
//!
//! Views are built from domain values at the edge so the wire shape
//! (camelCase, no password hash) stays independent of the domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{AuthSession, ComplaintWithOwner, OwnerSummary};
use crate::domain::{Account, Category, Complaint, ComplaintStatus, Priority, Role};

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub role: Role,
}

impl From<&Account> for UserView {
    fn from(account: &Account) -> Self {
        Self {
            id: *account.id().as_uuid(),
            name: account.name().to_string(),
            email: account.email().to_string(),
            role: account.role(),
        }
    }
}

/// Body returned by register, login and federated login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserView,
    /// Bearer token valid for 24 hours.
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserView::from(&session.account),
            token: session.token,
        }
    }
}

/// Contact details of a complaint's owner, shown to admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<OwnerSummary> for OwnerView {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            id: *owner.id.as_uuid(),
            name: owner.name,
            email: owner.email,
        }
    }
}

/// Wire form of a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintView {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub admin_remarks: Option<String>,
    pub image_url: Option<String>,
    pub is_confirmed_by_student: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Complaint> for ComplaintView {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: *complaint.id().as_uuid(),
            owner: *complaint.owner().as_uuid(),
            title: complaint.title().to_owned(),
            description: complaint.description().to_owned(),
            category: complaint.category(),
            priority: complaint.priority(),
            status: complaint.status(),
            admin_remarks: complaint.admin_remarks().map(str::to_owned),
            image_url: complaint.image_url().map(str::to_owned),
            is_confirmed_by_student: complaint.is_confirmed_by_owner(),
            created_at: complaint.created_at(),
            updated_at: complaint.updated_at(),
        }
    }
}

/// Admin listing entry: a complaint plus its owner's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminComplaintView {
    #[serde(flatten)]
    pub complaint: ComplaintView,
    /// Absent when the owning account no longer exists.
    pub owner_details: Option<OwnerView>,
}

impl From<ComplaintWithOwner> for AdminComplaintView {
    fn from(entry: ComplaintWithOwner) -> Self {
        Self {
            complaint: ComplaintView::from(&entry.complaint),
            owner_details: entry.owner.map(OwnerView::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{AccountId, ComplaintId, ComplaintSubmission};

    fn complaint() -> Complaint {
        let submission = ComplaintSubmission::try_from_parts(
            "Leaking tap",
            "Room 12 tap drips all night",
            "Plumbing",
            None,
            Some("https://img.example/tap.jpg"),
        )
        .expect("valid submission");
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
            .single()
            .expect("valid instant");
        Complaint::submit(ComplaintId::random(), AccountId::random(), submission, at)
    }

    #[rstest]
    fn complaint_view_uses_wire_names() {
        let value: Value =
            serde_json::to_value(ComplaintView::from(&complaint())).expect("serialises");
        for key in [
            "id",
            "owner",
            "title",
            "description",
            "category",
            "priority",
            "status",
            "adminRemarks",
            "imageUrl",
            "isConfirmedByStudent",
            "createdAt",
            "updatedAt",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["status"], json!("Pending"));
        assert_eq!(value["priority"], json!("Medium"));
        assert_eq!(value["adminRemarks"], Value::Null);
    }

    #[rstest]
    fn admin_view_flattens_complaint_fields() {
        let entry = ComplaintWithOwner {
            complaint: complaint(),
            owner: Some(OwnerSummary {
                id: AccountId::random(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
            }),
        };
        let value: Value =
            serde_json::to_value(AdminComplaintView::from(entry)).expect("serialises");
        assert_eq!(value["title"], json!("Leaking tap"));
        assert_eq!(value["ownerDetails"]["name"], json!("Ada"));
        assert_eq!(value["ownerDetails"]["email"], json!("ada@example.com"));
    }
}
