//! Restaurant repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::restaurants;

/// Input for creating or updating a restaurant.
#[derive(Debug, Clone)]
pub struct RestaurantInput {
    /// City the restaurant is in.
    pub city: String,
    /// Restaurant name.
    pub name: String,
    /// Cuisine, if known.
    pub cuisine: Option<String>,
    /// Meal type served (breakfast, lunch, dinner).
    pub meal_type: Option<String>,
    /// Cost per person.
    pub cost_per_person: Decimal,
    /// Cost currency.
    pub currency: String,
}

/// Restaurant repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RestaurantRepository {
    db: DatabaseConnection,
}

impl RestaurantRepository {
    /// Creates a new restaurant repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: &RestaurantInput) -> Result<restaurants::Model, DbErr> {
        let now = chrono::Utc::now().into();
        restaurants::ActiveModel {
            id: Set(Uuid::new_v4()),
            city: Set(input.city.clone()),
            name: Set(input.name.clone()),
            cuisine: Set(input.cuisine.clone()),
            meal_type: Set(input.meal_type.clone()),
            cost_per_person: Set(input.cost_per_person),
            currency: Set(input.currency.clone()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a restaurant by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<restaurants::Model>, DbErr> {
        restaurants::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists active restaurants, optionally filtered by city.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        city: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<restaurants::Model>, u64), DbErr> {
        let mut query = restaurants::Entity::find().filter(restaurants::Column::IsActive.eq(true));
        if let Some(city) = city {
            query = query.filter(restaurants::Column::City.eq(city));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(restaurants::Column::Name)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Updates a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the restaurant does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: &RestaurantInput,
    ) -> Result<restaurants::Model, DbErr> {
        restaurants::ActiveModel {
            id: Set(id),
            city: Set(input.city.clone()),
            name: Set(input.name.clone()),
            cuisine: Set(input.cuisine.clone()),
            meal_type: Set(input.meal_type.clone()),
            cost_per_person: Set(input.cost_per_person),
            currency: Set(input.currency.clone()),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }

    /// Deactivates a restaurant (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the restaurant does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), DbErr> {
        restaurants::ActiveModel {
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
