//! Sales lead repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use thiserror::Error;
use uuid::Uuid;

use triplexa_core::pipeline::{PipelineError, PipelineService};

use crate::entities::{sales_leads, sea_orm_active_enums::LeadStatus};

/// Errors specific to lead operations.
#[derive(Debug, Error)]
pub enum LeadError {
    /// Lead does not exist.
    #[error("lead not found")]
    NotFound,

    /// The status change violates pipeline rules.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Database failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Input for creating or updating a lead.
#[derive(Debug, Clone)]
pub struct LeadInput {
    /// Customer name.
    pub customer_name: String,
    /// Customer phone.
    pub customer_phone: Option<String>,
    /// Customer email.
    pub customer_email: Option<String>,
    /// Where the lead came from.
    pub source: Option<String>,
    /// Destination of interest.
    pub destination: Option<String>,
    /// Travel window start.
    pub travel_start: Option<chrono::NaiveDate>,
    /// Travel window end.
    pub travel_end: Option<chrono::NaiveDate>,
    /// Adult travellers.
    pub adults: i32,
    /// Child travellers.
    pub children: i32,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Converts the database lead status to the core pipeline status.
#[must_use]
pub const fn lead_status_to_core(status: LeadStatus) -> triplexa_core::pipeline::LeadStatus {
    match status {
        LeadStatus::New => triplexa_core::pipeline::LeadStatus::New,
        LeadStatus::Contacted => triplexa_core::pipeline::LeadStatus::Contacted,
        LeadStatus::Qualified => triplexa_core::pipeline::LeadStatus::Qualified,
        LeadStatus::Lost => triplexa_core::pipeline::LeadStatus::Lost,
    }
}

/// Converts the core pipeline status to the database lead status.
#[must_use]
pub const fn lead_status_from_core(status: triplexa_core::pipeline::LeadStatus) -> LeadStatus {
    match status {
        triplexa_core::pipeline::LeadStatus::New => LeadStatus::New,
        triplexa_core::pipeline::LeadStatus::Contacted => LeadStatus::Contacted,
        triplexa_core::pipeline::LeadStatus::Qualified => LeadStatus::Qualified,
        triplexa_core::pipeline::LeadStatus::Lost => LeadStatus::Lost,
    }
}

/// Lead repository for CRUD and status operations.
#[derive(Debug, Clone)]
pub struct LeadRepository {
    db: DatabaseConnection,
}

impl LeadRepository {
    /// Creates a new lead repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a lead in `new` status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: &LeadInput) -> Result<sales_leads::Model, DbErr> {
        let now = chrono::Utc::now().into();
        sales_leads::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_name: Set(input.customer_name.clone()),
            customer_phone: Set(input.customer_phone.clone()),
            customer_email: Set(input.customer_email.clone()),
            source: Set(input.source.clone()),
            destination: Set(input.destination.clone()),
            travel_start: Set(input.travel_start),
            travel_end: Set(input.travel_end),
            adults: Set(input.adults),
            children: Set(input.children),
            status: Set(LeadStatus::New),
            assigned_to: Set(None),
            notes: Set(input.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a lead by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<sales_leads::Model>, DbErr> {
        sales_leads::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists leads, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        status: Option<LeadStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<sales_leads::Model>, u64), DbErr> {
        let mut query = sales_leads::Entity::find();
        if let Some(status) = status {
            query = query.filter(sales_leads::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(sales_leads::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Moves a lead to a new status, enforcing pipeline rules.
    ///
    /// # Errors
    ///
    /// Returns `LeadError::NotFound` if the lead does not exist and
    /// `LeadError::Pipeline` for an invalid transition.
    pub async fn update_status(
        &self,
        id: Uuid,
        to: LeadStatus,
    ) -> Result<sales_leads::Model, LeadError> {
        let lead = self.find_by_id(id).await?.ok_or(LeadError::NotFound)?;

        PipelineService::transition_lead(
            lead_status_to_core(lead.status),
            lead_status_to_core(to),
        )?;

        let updated = sales_leads::ActiveModel {
            id: Set(id),
            status: Set(to),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(updated)
    }

    /// Assigns a lead to a staff profile (or clears the assignment).
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the lead does not exist.
    pub async fn assign(
        &self,
        id: Uuid,
        profile_id: Option<Uuid>,
    ) -> Result<sales_leads::Model, DbErr> {
        sales_leads::ActiveModel {
            id: Set(id),
            assigned_to: Set(profile_id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }
}
