//! Quote repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use triplexa_core::pipeline::PipelineService;
use triplexa_core::quote::{QuoteError as CoreQuoteError, QuoteService};

use crate::entities::sea_orm_active_enums::{EnquiryStatus, QuoteItemKind, QuoteStatus};
use crate::entities::{quote_items, quotes, sales_enquiries};
use crate::repositories::enquiry::enquiry_status_to_core;
use crate::rls::RlsConnection;

/// Errors specific to quote operations.
#[derive(Debug, Error)]
pub enum QuoteRepoError {
    /// Quote does not exist.
    #[error("quote not found")]
    NotFound,

    /// The status change violates quote rules.
    #[error(transparent)]
    Quote(#[from] CoreQuoteError),

    /// The linked enquiry cannot move with the quote.
    #[error(transparent)]
    Pipeline(#[from] triplexa_core::pipeline::PipelineError),

    /// Database failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// One computed line ready for insertion.
#[derive(Debug, Clone)]
pub struct QuoteItemRecord {
    /// What the line refers to.
    pub kind: QuoteItemKind,
    /// Inventory row the line was composed from, if any.
    pub reference_id: Option<Uuid>,
    /// Human-readable description.
    pub description: String,
    /// Quantity.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Quantity times unit price.
    pub line_total: Decimal,
}

/// Header fields for a new quote.
#[derive(Debug, Clone)]
pub struct QuoteHeader {
    /// Enquiry this quote answers, if any.
    pub enquiry_id: Option<Uuid>,
    /// Agent the quote belongs to, if any.
    pub agent_id: Option<Uuid>,
    /// Customer name.
    pub customer_name: String,
    /// Quote currency.
    pub currency: String,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Markup applied on the subtotal.
    pub markup_amount: Decimal,
    /// Final total.
    pub total_amount: Decimal,
    /// Profile that created the quote.
    pub created_by: Uuid,
}

/// Converts the database quote status to the core status.
#[must_use]
pub const fn quote_status_to_core(status: QuoteStatus) -> triplexa_core::quote::QuoteStatus {
    match status {
        QuoteStatus::Draft => triplexa_core::quote::QuoteStatus::Draft,
        QuoteStatus::Sent => triplexa_core::quote::QuoteStatus::Sent,
        QuoteStatus::Accepted => triplexa_core::quote::QuoteStatus::Accepted,
        QuoteStatus::Rejected => triplexa_core::quote::QuoteStatus::Rejected,
    }
}

/// Quote repository for CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    db: DatabaseConnection,
}

impl QuoteRepository {
    /// Creates a new quote repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a quote with its line items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is persisted then.
    pub async fn create_with_items(
        &self,
        header: &QuoteHeader,
        items: &[QuoteItemRecord],
    ) -> Result<(quotes::Model, Vec<quote_items::Model>), DbErr> {
        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().into();
        let quote = quotes::ActiveModel {
            id: Set(Uuid::new_v4()),
            enquiry_id: Set(header.enquiry_id),
            agent_id: Set(header.agent_id),
            customer_name: Set(header.customer_name.clone()),
            currency: Set(header.currency.clone()),
            status: Set(QuoteStatus::Draft),
            subtotal: Set(header.subtotal),
            markup_amount: Set(header.markup_amount),
            total_amount: Set(header.total_amount),
            created_by: Set(header.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut rows = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let position = i32::try_from(i).unwrap_or(i32::MAX).saturating_add(1);
            let row = quote_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                quote_id: Set(quote.id),
                kind: Set(item.kind),
                reference_id: Set(item.reference_id),
                description: Set(item.description.clone()),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                line_total: Set(item.line_total),
                position: Set(position),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            rows.push(row);
        }

        txn.commit().await?;

        Ok((quote, rows))
    }

    /// Finds a quote with its items, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_items(
        &self,
        id: Uuid,
    ) -> Result<Option<(quotes::Model, Vec<quote_items::Model>)>, DbErr> {
        let Some(quote) = quotes::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let items = quote_items::Entity::find()
            .filter(quote_items::Column::QuoteId.eq(id))
            .order_by_asc(quote_items::Column::Position)
            .all(&self.db)
            .await?;

        Ok(Some((quote, items)))
    }

    /// Lists quotes, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        status: Option<QuoteStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<quotes::Model>, u64), DbErr> {
        let mut query = quotes::Entity::find();
        if let Some(status) = status {
            query = query.filter(quotes::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(quotes::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Lists an agent's quotes under an RLS-scoped transaction.
    ///
    /// The row-level policy is the enforcement; the explicit filter is the
    /// query plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_agent(
        &self,
        agent_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<quotes::Model>, u64), DbErr> {
        let rls = RlsConnection::for_agent(&self.db, agent_id).await?;

        let query = quotes::Entity::find().filter(quotes::Column::AgentId.eq(agent_id));
        let total = query.clone().count(rls.transaction()).await?;
        let rows = query
            .order_by_desc(quotes::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(rls.transaction())
            .await?;

        rls.commit().await?;

        Ok((rows, total))
    }

    /// Moves a quote to a new status, enforcing lifecycle rules.
    ///
    /// Sending a quote that answers an open enquiry also moves the enquiry
    /// to `quoted`, in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `QuoteRepoError::NotFound` if the quote does not exist and
    /// `QuoteRepoError::Quote` for an invalid transition.
    pub async fn update_status(
        &self,
        id: Uuid,
        to: QuoteStatus,
    ) -> Result<quotes::Model, QuoteRepoError> {
        let quote = quotes::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(QuoteRepoError::NotFound)?;

        QuoteService::transition(quote_status_to_core(quote.status), quote_status_to_core(to))?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let updated = quotes::ActiveModel {
            id: Set(id),
            status: Set(to),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        if to == QuoteStatus::Sent {
            if let Some(enquiry_id) = quote.enquiry_id {
                let enquiry = sales_enquiries::Entity::find_by_id(enquiry_id)
                    .one(&txn)
                    .await?;
                if let Some(enquiry) = enquiry {
                    if enquiry.status == EnquiryStatus::Open {
                        PipelineService::transition_enquiry(
                            enquiry_status_to_core(enquiry.status),
                            triplexa_core::pipeline::EnquiryStatus::Quoted,
                        )?;
                        sales_enquiries::ActiveModel {
                            id: Set(enquiry_id),
                            status: Set(EnquiryStatus::Quoted),
                            updated_at: Set(now),
                            ..Default::default()
                        }
                        .update(&txn)
                        .await?;
                    }
                }
            }
        }

        txn.commit().await?;

        Ok(updated)
    }
}
