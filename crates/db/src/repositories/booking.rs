//! Sales booking repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use triplexa_core::pipeline::{PipelineError, PipelineService};

use crate::entities::sea_orm_active_enums::{
    BookingStatus, EnquiryStatus, PaymentStatus, QuoteStatus,
};
use crate::entities::{quotes, sales_bookings, sales_enquiries};
use crate::repositories::enquiry::enquiry_status_to_core;

/// Errors specific to booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Booking does not exist.
    #[error("booking not found")]
    NotFound,

    /// The quote backing the booking does not exist.
    #[error("quote not found")]
    QuoteNotFound,

    /// Only accepted quotes can back a booking.
    #[error("quote has not been accepted")]
    QuoteNotAccepted,

    /// The quote is not linked to an enquiry.
    #[error("quote is not linked to an enquiry")]
    NoEnquiry,

    /// The operation violates pipeline rules.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Database failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Converts the database booking status to the core pipeline status.
#[must_use]
pub const fn booking_status_to_core(
    status: BookingStatus,
) -> triplexa_core::pipeline::BookingStatus {
    match status {
        BookingStatus::Confirmed => triplexa_core::pipeline::BookingStatus::Confirmed,
        BookingStatus::Completed => triplexa_core::pipeline::BookingStatus::Completed,
        BookingStatus::Cancelled => triplexa_core::pipeline::BookingStatus::Cancelled,
    }
}

/// Booking repository for conversion and lifecycle operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: DatabaseConnection,
}

impl BookingRepository {
    /// Creates a new booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Converts a quoted enquiry with an accepted quote into a booking.
    ///
    /// Copies the quote total onto the booking, marks the enquiry `won`,
    /// and runs everything in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::QuoteNotAccepted` unless the quote was
    /// accepted and `BookingError::Pipeline` unless the enquiry is quoted.
    pub async fn create_from_quote(
        &self,
        quote_id: Uuid,
        travel_start: chrono::NaiveDate,
        travel_end: chrono::NaiveDate,
    ) -> Result<sales_bookings::Model, BookingError> {
        let quote = quotes::Entity::find_by_id(quote_id)
            .one(&self.db)
            .await?
            .ok_or(BookingError::QuoteNotFound)?;

        if quote.status != QuoteStatus::Accepted {
            return Err(BookingError::QuoteNotAccepted);
        }

        let enquiry_id = quote.enquiry_id.ok_or(BookingError::NoEnquiry)?;
        let enquiry = sales_enquiries::Entity::find_by_id(enquiry_id)
            .one(&self.db)
            .await?
            .ok_or(BookingError::NoEnquiry)?;

        PipelineService::convert_enquiry(enquiry_status_to_core(enquiry.status))?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let booking = sales_bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            enquiry_id: Set(enquiry_id),
            quote_id: Set(quote.id),
            travel_start: Set(travel_start),
            travel_end: Set(travel_end),
            total_amount: Set(quote.total_amount),
            currency: Set(quote.currency.clone()),
            payment_status: Set(PaymentStatus::Unpaid),
            status: Set(BookingStatus::Confirmed),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        sales_enquiries::ActiveModel {
            id: Set(enquiry_id),
            status: Set(EnquiryStatus::Won),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        Ok(booking)
    }

    /// Finds a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<sales_bookings::Model>, DbErr> {
        sales_bookings::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists bookings, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        status: Option<BookingStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<sales_bookings::Model>, u64), DbErr> {
        let mut query = sales_bookings::Entity::find();
        if let Some(status) = status {
            query = query.filter(sales_bookings::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(sales_bookings::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Moves a booking to a new status, enforcing pipeline rules.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotFound` if the booking does not exist and
    /// `BookingError::Pipeline` for an invalid transition.
    pub async fn update_status(
        &self,
        id: Uuid,
        to: BookingStatus,
    ) -> Result<sales_bookings::Model, BookingError> {
        let booking = self.find_by_id(id).await?.ok_or(BookingError::NotFound)?;

        PipelineService::transition_booking(
            booking_status_to_core(booking.status),
            booking_status_to_core(to),
        )?;

        let updated = sales_bookings::ActiveModel {
            id: Set(id),
            status: Set(to),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(updated)
    }

    /// Records a payment status change.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the booking does not exist.
    pub async fn set_payment_status(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<sales_bookings::Model, DbErr> {
        sales_bookings::ActiveModel {
            id: Set(id),
            payment_status: Set(payment_status),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }
}
