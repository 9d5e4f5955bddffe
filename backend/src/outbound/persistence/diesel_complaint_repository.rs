//! PostgreSQL-backed `ComplaintRepository`.
//!
//! Status updates are a single `UPDATE ... RETURNING`. Confirmation is a
//! conditional update guarded by `status = 'Resolved'`, so it cannot land on
//! a complaint an admin has just reopened.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{
    AccountId, Complaint, ComplaintFilter, ComplaintId, ComplaintRecord, ComplaintStatus,
    ConfirmOutcome,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ComplaintRow, ComplaintStatusUpdate, NewComplaintRow};
use super::pool::{DbPool, PoolError};
use super::schema::complaints;

#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ComplaintRepositoryError {
    map_basic_pool_error(error, ComplaintRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ComplaintRepositoryError {
    map_basic_diesel_error(
        error,
        ComplaintRepositoryError::query,
        ComplaintRepositoryError::connection,
    )
}

fn row_to_complaint(row: ComplaintRow) -> Result<Complaint, ComplaintRepositoryError> {
    let id = row.id;
    let corrupt = |err: crate::domain::ComplaintValidationError| {
        ComplaintRepositoryError::query(format!("stored complaint {id} is invalid: {err}"))
    };
    Ok(Complaint::from_record(ComplaintRecord {
        id: ComplaintId::from_uuid(row.id),
        owner: AccountId::from_uuid(row.owner_id),
        category: row.category.parse().map_err(corrupt)?,
        priority: row.priority.parse().map_err(corrupt)?,
        status: row.status.parse().map_err(corrupt)?,
        title: row.title,
        description: row.description,
        admin_remarks: row.admin_remarks,
        image_url: row.image_url,
        confirmed_by_owner: row.is_confirmed_by_owner,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewComplaintRow {
            id: *complaint.id().as_uuid(),
            owner_id: *complaint.owner().as_uuid(),
            title: complaint.title(),
            description: complaint.description(),
            category: complaint.category().as_str(),
            priority: complaint.priority().as_str(),
            status: complaint.status().as_str(),
            admin_remarks: complaint.admin_remarks(),
            image_url: complaint.image_url(),
            is_confirmed_by_owner: complaint.is_confirmed_by_owner(),
            created_at: complaint.created_at(),
            updated_at: complaint.updated_at(),
        };
        diesel::insert_into(complaints::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        complaints::table
            .filter(complaints::id.eq(id.as_uuid()))
            .select(ComplaintRow::as_select())
            .first::<ComplaintRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_complaint)
            .transpose()
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query: complaints::BoxedQuery<'_, Pg> = complaints::table.into_boxed();
        if let Some(owner) = filter.owner {
            query = query.filter(complaints::owner_id.eq(*owner.as_uuid()));
        }
        if let Some(status) = filter.status {
            query = query.filter(complaints::status.eq(status.as_str()));
        }
        if let Some(category) = filter.category {
            query = query.filter(complaints::category.eq(category.as_str()));
        }

        query
            .order((complaints::created_at.desc(), complaints::id.desc()))
            .select(ComplaintRow::as_select())
            .load::<ComplaintRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_complaint)
            .collect()
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ComplaintStatusUpdate {
            status: status.as_str(),
            admin_remarks: remarks.as_deref().filter(|text| !text.is_empty()),
            updated_at: now,
        };
        diesel::update(complaints::table.filter(complaints::id.eq(id.as_uuid())))
            .set(&changes)
            .returning(ComplaintRow::as_returning())
            .get_result::<ComplaintRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_complaint)
            .transpose()
    }

    async fn confirm_resolved(
        &self,
        id: &ComplaintId,
        now: DateTime<Utc>,
    ) -> Result<ConfirmOutcome, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let resolved = ComplaintStatus::Resolved.as_str();

        let flipped = diesel::update(
            complaints::table
                .filter(complaints::id.eq(id.as_uuid()))
                .filter(complaints::status.eq(resolved))
                .filter(complaints::is_confirmed_by_owner.eq(false)),
        )
        .set((
            complaints::is_confirmed_by_owner.eq(true),
            complaints::updated_at.eq(now),
        ))
        .returning(ComplaintRow::as_returning())
        .get_result::<ComplaintRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        if let Some(row) = flipped {
            return row_to_complaint(row).map(ConfirmOutcome::Confirmed);
        }

        // Nothing flipped: unknown id, not resolved, or already confirmed.
        let current = complaints::table
            .filter(complaints::id.eq(id.as_uuid()))
            .select(ComplaintRow::as_select())
            .first::<ComplaintRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_complaint)
            .transpose()?;

        Ok(match current {
            None => ConfirmOutcome::NotFound,
            Some(complaint) if complaint.status() == ComplaintStatus::Resolved => {
                ConfirmOutcome::Confirmed(complaint)
            }
            Some(complaint) => ConfirmOutcome::NotResolved(complaint.status()),
        })
    }
}
