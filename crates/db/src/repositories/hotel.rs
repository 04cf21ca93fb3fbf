//! Hotel repository for database operations.

use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{hotel_room_rates, hotels};

/// Hotel repository for hotels and seasonal room rates.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    db: DatabaseConnection,
}

impl HotelRepository {
    /// Creates a new hotel repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a hotel.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        city: &str,
        name: &str,
        star_rating: i16,
        address: Option<&str>,
    ) -> Result<hotels::Model, DbErr> {
        let now = chrono::Utc::now().into();
        hotels::ActiveModel {
            id: Set(Uuid::new_v4()),
            city: Set(city.to_string()),
            name: Set(name.to_string()),
            star_rating: Set(star_rating),
            address: Set(address.map(String::from)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a hotel with its room rates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_rates(
        &self,
        id: Uuid,
    ) -> Result<Option<(hotels::Model, Vec<hotel_room_rates::Model>)>, DbErr> {
        let Some(hotel) = hotels::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let rates = hotel_room_rates::Entity::find()
            .filter(hotel_room_rates::Column::HotelId.eq(id))
            .order_by_asc(hotel_room_rates::Column::Season)
            .order_by_asc(hotel_room_rates::Column::RoomType)
            .all(&self.db)
            .await?;

        Ok(Some((hotel, rates)))
    }

    /// Lists active hotels, optionally filtered by city.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        city: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<hotels::Model>, u64), DbErr> {
        let mut query = hotels::Entity::find().filter(hotels::Column::IsActive.eq(true));
        if let Some(city) = city {
            query = query.filter(hotels::Column::City.eq(city));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(hotels::Column::Name)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Upserts a seasonal room rate, keyed on (hotel, season, room type).
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails.
    pub async fn upsert_rate(
        &self,
        hotel_id: Uuid,
        season: &str,
        room_type: &str,
        rate_per_night: Decimal,
        currency: &str,
    ) -> Result<hotel_room_rates::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let rate = hotel_room_rates::ActiveModel {
            id: Set(Uuid::new_v4()),
            hotel_id: Set(hotel_id),
            season: Set(season.to_string()),
            room_type: Set(room_type.to_string()),
            rate_per_night: Set(rate_per_night),
            currency: Set(currency.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        hotel_room_rates::Entity::insert(rate)
            .on_conflict(
                OnConflict::columns([
                    hotel_room_rates::Column::HotelId,
                    hotel_room_rates::Column::Season,
                    hotel_room_rates::Column::RoomType,
                ])
                .update_columns([
                    hotel_room_rates::Column::RatePerNight,
                    hotel_room_rates::Column::Currency,
                    hotel_room_rates::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }

    /// Deactivates a hotel (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the hotel does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), DbErr> {
        hotels::ActiveModel {
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
