//! Sales enquiry repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use thiserror::Error;
use uuid::Uuid;

use triplexa_core::pipeline::{PipelineError, PipelineService};

use crate::entities::{sales_enquiries, sales_leads, sea_orm_active_enums::EnquiryStatus};
use crate::repositories::lead::lead_status_to_core;

/// Errors specific to enquiry operations.
#[derive(Debug, Error)]
pub enum EnquiryError {
    /// Enquiry does not exist.
    #[error("enquiry not found")]
    NotFound,

    /// The source lead does not exist.
    #[error("lead not found")]
    LeadNotFound,

    /// The operation violates pipeline rules.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Database failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Input for creating an enquiry.
#[derive(Debug, Clone)]
pub struct EnquiryInput {
    /// Customer name.
    pub customer_name: String,
    /// Destination.
    pub destination: String,
    /// Structured requirements (hotel category, meal plan, ...).
    pub requirements: Option<serde_json::Value>,
    /// Travel window start.
    pub travel_start: Option<chrono::NaiveDate>,
    /// Travel window end.
    pub travel_end: Option<chrono::NaiveDate>,
    /// Adult travellers.
    pub adults: i32,
    /// Child travellers.
    pub children: i32,
}

/// Converts the database enquiry status to the core pipeline status.
#[must_use]
pub const fn enquiry_status_to_core(
    status: EnquiryStatus,
) -> triplexa_core::pipeline::EnquiryStatus {
    match status {
        EnquiryStatus::Open => triplexa_core::pipeline::EnquiryStatus::Open,
        EnquiryStatus::Quoted => triplexa_core::pipeline::EnquiryStatus::Quoted,
        EnquiryStatus::Won => triplexa_core::pipeline::EnquiryStatus::Won,
        EnquiryStatus::Lost => triplexa_core::pipeline::EnquiryStatus::Lost,
    }
}

/// Enquiry repository for CRUD and conversion operations.
#[derive(Debug, Clone)]
pub struct EnquiryRepository {
    db: DatabaseConnection,
}

impl EnquiryRepository {
    /// Creates a new enquiry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a standalone enquiry in `open` status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: &EnquiryInput) -> Result<sales_enquiries::Model, DbErr> {
        let now = chrono::Utc::now().into();
        sales_enquiries::ActiveModel {
            id: Set(Uuid::new_v4()),
            lead_id: Set(None),
            customer_name: Set(input.customer_name.clone()),
            destination: Set(input.destination.clone()),
            requirements: Set(input.requirements.clone()),
            travel_start: Set(input.travel_start),
            travel_end: Set(input.travel_end),
            adults: Set(input.adults),
            children: Set(input.children),
            status: Set(EnquiryStatus::Open),
            assigned_to: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Converts a qualified lead into an enquiry.
    ///
    /// The lead keeps its `qualified` status; the enquiry records the link.
    ///
    /// # Errors
    ///
    /// Returns `EnquiryError::LeadNotFound` if the lead does not exist and
    /// `EnquiryError::Pipeline` if the lead is not qualified.
    pub async fn create_from_lead(
        &self,
        lead_id: Uuid,
        input: &EnquiryInput,
    ) -> Result<sales_enquiries::Model, EnquiryError> {
        let lead = sales_leads::Entity::find_by_id(lead_id)
            .one(&self.db)
            .await?
            .ok_or(EnquiryError::LeadNotFound)?;

        PipelineService::convert_lead(lead_status_to_core(lead.status))?;

        let now = chrono::Utc::now().into();
        let enquiry = sales_enquiries::ActiveModel {
            id: Set(Uuid::new_v4()),
            lead_id: Set(Some(lead_id)),
            customer_name: Set(input.customer_name.clone()),
            destination: Set(input.destination.clone()),
            requirements: Set(input.requirements.clone()),
            travel_start: Set(input.travel_start),
            travel_end: Set(input.travel_end),
            adults: Set(input.adults),
            children: Set(input.children),
            status: Set(EnquiryStatus::Open),
            assigned_to: Set(lead.assigned_to),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(enquiry)
    }

    /// Finds an enquiry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<sales_enquiries::Model>, DbErr> {
        sales_enquiries::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists enquiries, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        status: Option<EnquiryStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<sales_enquiries::Model>, u64), DbErr> {
        let mut query = sales_enquiries::Entity::find();
        if let Some(status) = status {
            query = query.filter(sales_enquiries::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(sales_enquiries::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Moves an enquiry to a new status, enforcing pipeline rules.
    ///
    /// # Errors
    ///
    /// Returns `EnquiryError::NotFound` if the enquiry does not exist and
    /// `EnquiryError::Pipeline` for an invalid transition.
    pub async fn update_status(
        &self,
        id: Uuid,
        to: EnquiryStatus,
    ) -> Result<sales_enquiries::Model, EnquiryError> {
        let enquiry = self.find_by_id(id).await?.ok_or(EnquiryError::NotFound)?;

        PipelineService::transition_enquiry(
            enquiry_status_to_core(enquiry.status),
            enquiry_status_to_core(to),
        )?;

        let updated = sales_enquiries::ActiveModel {
            id: Set(id),
            status: Set(to),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(updated)
    }

    /// Assigns an enquiry to a staff profile (or clears the assignment).
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the enquiry does not exist.
    pub async fn assign(
        &self,
        id: Uuid,
        profile_id: Option<Uuid>,
    ) -> Result<sales_enquiries::Model, DbErr> {
        sales_enquiries::ActiveModel {
            id: Set(id),
            assigned_to: Set(profile_id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }
}
