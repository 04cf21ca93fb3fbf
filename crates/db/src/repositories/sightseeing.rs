//! Sightseeing repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::sightseeing_options;

/// Input for creating or updating a sightseeing option.
#[derive(Debug, Clone)]
pub struct SightseeingInput {
    /// City the attraction is in.
    pub city: String,
    /// Attraction name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Ticket cost per person.
    pub ticket_cost: Decimal,
    /// Cost currency.
    pub currency: String,
    /// Visit duration in minutes.
    pub duration_minutes: i32,
}

/// Sightseeing repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SightseeingRepository {
    db: DatabaseConnection,
}

impl SightseeingRepository {
    /// Creates a new sightseeing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a sightseeing option.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: &SightseeingInput,
    ) -> Result<sightseeing_options::Model, DbErr> {
        let now = chrono::Utc::now().into();
        sightseeing_options::ActiveModel {
            id: Set(Uuid::new_v4()),
            city: Set(input.city.clone()),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            ticket_cost: Set(input.ticket_cost),
            currency: Set(input.currency.clone()),
            duration_minutes: Set(input.duration_minutes),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a sightseeing option by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<sightseeing_options::Model>, DbErr> {
        sightseeing_options::Entity::find_by_id(id)
            .one(&self.db)
            .await
    }

    /// Lists active options, optionally filtered by city.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        city: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<sightseeing_options::Model>, u64), DbErr> {
        let mut query = sightseeing_options::Entity::find()
            .filter(sightseeing_options::Column::IsActive.eq(true));
        if let Some(city) = city {
            query = query.filter(sightseeing_options::Column::City.eq(city));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(sightseeing_options::Column::Name)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Updates a sightseeing option.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the option does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: &SightseeingInput,
    ) -> Result<sightseeing_options::Model, DbErr> {
        sightseeing_options::ActiveModel {
            id: Set(id),
            city: Set(input.city.clone()),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            ticket_cost: Set(input.ticket_cost),
            currency: Set(input.currency.clone()),
            duration_minutes: Set(input.duration_minutes),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }

    /// Deactivates a sightseeing option (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the option does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), DbErr> {
        sightseeing_options::ActiveModel {
            id: Set(id),
            is_active: Set(false),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }
}
