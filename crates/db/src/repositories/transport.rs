//! Transport repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{intermediate_stops, transport_routes, transport_types};

/// Input for creating or updating a route.
#[derive(Debug, Clone)]
pub struct RouteInput {
    /// Origin city.
    pub origin: String,
    /// Destination city.
    pub destination: String,
    /// Vehicle class reference.
    pub transport_type_id: Uuid,
    /// Route length in kilometres.
    pub distance_km: Decimal,
    /// Travel time in minutes.
    pub duration_minutes: i32,
    /// Fare before markup.
    pub base_fare: Decimal,
    /// Fare currency.
    pub currency: String,
    /// Stop names in travel order.
    pub stops: Vec<String>,
}

/// Transport repository for vehicle types, routes, and stops.
#[derive(Debug, Clone)]
pub struct TransportRepository {
    db: DatabaseConnection,
}

impl TransportRepository {
    /// Creates a new transport repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all transport types.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_types(&self) -> Result<Vec<transport_types::Model>, DbErr> {
        transport_types::Entity::find()
            .order_by_asc(transport_types::Column::Name)
            .all(&self.db)
            .await
    }

    /// Creates a transport type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_type(
        &self,
        name: &str,
        vehicle_class: Option<&str>,
        seats: i32,
    ) -> Result<transport_types::Model, DbErr> {
        let now = chrono::Utc::now().into();
        transport_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            vehicle_class: Set(vehicle_class.map(String::from)),
            seats: Set(seats),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a transport type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_type(&self, id: Uuid) -> Result<Option<transport_types::Model>, DbErr> {
        transport_types::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a route with its intermediate stops in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is persisted then.
    pub async fn create_route(
        &self,
        input: &RouteInput,
    ) -> Result<(transport_routes::Model, Vec<intermediate_stops::Model>), DbErr> {
        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().into();
        let route = transport_routes::ActiveModel {
            id: Set(Uuid::new_v4()),
            origin: Set(input.origin.clone()),
            destination: Set(input.destination.clone()),
            transport_type_id: Set(input.transport_type_id),
            distance_km: Set(input.distance_km),
            duration_minutes: Set(input.duration_minutes),
            base_fare: Set(input.base_fare),
            currency: Set(input.currency.clone()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut stops = Vec::with_capacity(input.stops.len());
        for (i, name) in input.stops.iter().enumerate() {
            let position = i32::try_from(i).unwrap_or(i32::MAX).saturating_add(1);
            let stop = intermediate_stops::ActiveModel {
                id: Set(Uuid::new_v4()),
                route_id: Set(route.id),
                name: Set(name.clone()),
                position: Set(position),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            stops.push(stop);
        }

        txn.commit().await?;

        Ok((route, stops))
    }

    /// Finds a route with its stops, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_route_with_stops(
        &self,
        id: Uuid,
    ) -> Result<Option<(transport_routes::Model, Vec<intermediate_stops::Model>)>, DbErr> {
        let Some(route) = transport_routes::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let stops = intermediate_stops::Entity::find()
            .filter(intermediate_stops::Column::RouteId.eq(id))
            .order_by_asc(intermediate_stops::Column::Position)
            .all(&self.db)
            .await?;

        Ok(Some((route, stops)))
    }

    /// Lists active routes, optionally filtered by endpoints, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_routes(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<transport_routes::Model>, u64), DbErr> {
        let mut query =
            transport_routes::Entity::find().filter(transport_routes::Column::IsActive.eq(true));
        if let Some(origin) = origin {
            query = query.filter(transport_routes::Column::Origin.eq(origin));
        }
        if let Some(destination) = destination {
            query = query.filter(transport_routes::Column::Destination.eq(destination));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(transport_routes::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Updates a route and replaces its stops wholesale, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the route does not exist.
    pub async fn update_route(
        &self,
        id: Uuid,
        input: &RouteInput,
    ) -> Result<(transport_routes::Model, Vec<intermediate_stops::Model>), DbErr> {
        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().into();
        let route = transport_routes::ActiveModel {
            id: Set(id),
            origin: Set(input.origin.clone()),
            destination: Set(input.destination.clone()),
            transport_type_id: Set(input.transport_type_id),
            distance_km: Set(input.distance_km),
            duration_minutes: Set(input.duration_minutes),
            base_fare: Set(input.base_fare),
            currency: Set(input.currency.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        intermediate_stops::Entity::delete_many()
            .filter(intermediate_stops::Column::RouteId.eq(id))
            .exec(&txn)
            .await?;

        let mut stops = Vec::with_capacity(input.stops.len());
        for (i, name) in input.stops.iter().enumerate() {
            let position = i32::try_from(i).unwrap_or(i32::MAX).saturating_add(1);
            let stop = intermediate_stops::ActiveModel {
                id: Set(Uuid::new_v4()),
                route_id: Set(id),
                name: Set(name.clone()),
                position: Set(position),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            stops.push(stop);
        }

        txn.commit().await?;

        Ok((route, stops))
    }

    /// Deactivates a route (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the route does not exist.
    pub async fn deactivate_route(&self, id: Uuid) -> Result<(), DbErr> {
        transport_routes::ActiveModel {
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
