//! Complaint API handlers.
//!
//! ```text
//! POST  /api/complaints {"title":"Leak","description":"...","category":"Plumbing"}
//! GET   /api/complaints/my?status=Pending
//! GET   /api/complaints?category=Electrical          (admin)
//! PATCH /api/complaints/{id} {"status":"Resolved","adminRemarks":"Fixed"}  (admin)
//! POST  /api/complaints/{id}/confirm                 (owner)
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::{
    Category, ComplaintFilter, ComplaintId, ComplaintStatus, ComplaintSubmission, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminAccount, Authenticated};
use crate::inbound::http::schemas::{AdminComplaintView, ComplaintView};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_complaint_validation_error, parse_uuid};

const COMPLAINT_ID: FieldName = FieldName::new("id");

/// Request body for `POST /api/complaints`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    pub title: String,
    pub description: String,
    #[schema(example = "Plumbing")]
    pub category: String,
    /// `Low`, `Medium` (default) or `High`.
    #[serde(default)]
    pub priority: Option<String>,
    /// Opaque reference to an uploaded image.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request body for `PATCH /api/complaints/{id}`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[schema(example = "In Progress")]
    pub status: String,
    /// Replaces any previous remarks; omit or send empty to clear.
    #[serde(default)]
    pub admin_remarks: Option<String>,
}

/// Optional exact-match filters for complaint listings. Blank values mean
/// no filter.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ComplaintListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ComplaintListQuery {
    fn into_filter(self) -> Result<ComplaintFilter, Error> {
        let status = self
            .status
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(ComplaintStatus::from_str)
            .transpose()
            .map_err(map_complaint_validation_error)?;
        let category = self
            .category
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(Category::from_str)
            .transpose()
            .map_err(map_complaint_validation_error)?;
        Ok(ComplaintFilter {
            owner: None,
            status,
            category,
        })
    }
}

fn parse_complaint_id(raw: &str) -> Result<ComplaintId, Error> {
    parse_uuid(raw, COMPLAINT_ID).map(ComplaintId::from_uuid)
}

/// File a new complaint owned by the caller.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintView),
        (status = 400, description = "Invalid input", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "createComplaint"
)]
#[post("/complaints")]
pub async fn create_complaint(
    state: web::Data<HttpState>,
    Authenticated(actor): Authenticated,
    payload: web::Json<CreateComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let submission = ComplaintSubmission::try_from_parts(
        &body.title,
        &body.description,
        &body.category,
        body.priority.as_deref(),
        body.image_url.as_deref(),
    )
    .map_err(map_complaint_validation_error)?;
    let complaint = state.complaints.submit(&actor, submission).await?;
    Ok(HttpResponse::Created().json(ComplaintView::from(&complaint)))
}

/// List the caller's own complaints, newest first.
#[utoipa::path(
    get,
    path = "/api/complaints/my",
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "Own complaints", body = [ComplaintView]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listOwnComplaints"
)]
#[get("/complaints/my")]
pub async fn list_own_complaints(
    state: web::Data<HttpState>,
    Authenticated(actor): Authenticated,
    query: web::Query<ComplaintListQuery>,
) -> ApiResult<web::Json<Vec<ComplaintView>>> {
    let filter = query.into_inner().into_filter()?;
    let complaints = state.complaints_query.list_own(&actor, filter).await?;
    Ok(web::Json(complaints.iter().map(ComplaintView::from).collect()))
}

/// List every complaint with owner details. Admin only.
#[utoipa::path(
    get,
    path = "/api/complaints",
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "All complaints", body = [AdminComplaintView]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listAllComplaints"
)]
#[get("/complaints")]
pub async fn list_all_complaints(
    state: web::Data<HttpState>,
    AdminAccount(actor): AdminAccount,
    query: web::Query<ComplaintListQuery>,
) -> ApiResult<web::Json<Vec<AdminComplaintView>>> {
    let filter = query.into_inner().into_filter()?;
    let entries = state.complaints_query.list_all(&actor, filter).await?;
    Ok(web::Json(
        entries.into_iter().map(AdminComplaintView::from).collect(),
    ))
}

/// Set a complaint's status and remarks. Admin only.
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "Complaint identifier")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated complaint", body = ComplaintView),
        (status = 400, description = "Invalid status or transition", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Complaint not found", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "updateComplaintStatus"
)]
#[patch("/complaints/{id}")]
pub async fn update_complaint_status(
    state: web::Data<HttpState>,
    AdminAccount(actor): AdminAccount,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<ComplaintView>> {
    let id = parse_complaint_id(&path.into_inner())?;
    let body = payload.into_inner();
    let status =
        ComplaintStatus::from_str(&body.status).map_err(map_complaint_validation_error)?;
    let complaint = state
        .complaints
        .set_status(&actor, id, status, body.admin_remarks)
        .await?;
    Ok(web::Json(ComplaintView::from(&complaint)))
}

/// Confirm that a resolved complaint is fixed. Owner only.
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/confirm",
    params(("id" = String, Path, description = "Complaint identifier")),
    responses(
        (status = 200, description = "Confirmed complaint", body = ComplaintView),
        (status = 400, description = "Complaint is not resolved", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the complaint's owner", body = Error),
        (status = 404, description = "Complaint not found", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "confirmComplaint"
)]
#[post("/complaints/{id}/confirm")]
pub async fn confirm_complaint(
    state: web::Data<HttpState>,
    Authenticated(actor): Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<ComplaintView>> {
    let id = parse_complaint_id(&path.into_inner())?;
    let complaint = state.complaints.confirm(&actor, id).await?;
    Ok(web::Json(ComplaintView::from(&complaint)))
}

#[cfg(test)]
#[path = "complaints_tests.rs"]
mod tests;
