//! App settings repository for database operations.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::app_settings;

/// Settings repository for key-value configuration rows.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all settings, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<app_settings::Model>, DbErr> {
        app_settings::Entity::find()
            .order_by_asc(app_settings::Column::Key)
            .all(&self.db)
            .await
    }

    /// Gets a setting by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, key: &str) -> Result<Option<app_settings::Model>, DbErr> {
        app_settings::Entity::find()
            .filter(app_settings::Column::Key.eq(key))
            .one(&self.db)
            .await
    }

    /// Upserts a setting by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails.
    pub async fn upsert(
        &self,
        key: &str,
        value: serde_json::Value,
        description: Option<&str>,
    ) -> Result<app_settings::Model, DbErr> {
        let setting = app_settings::ActiveModel {
            id: Set(Uuid::new_v4()),
            key: Set(key.to_string()),
            value: Set(value),
            description: Set(description.map(String::from)),
            updated_at: Set(chrono::Utc::now().into()),
        };

        app_settings::Entity::insert(setting)
            .on_conflict(
                OnConflict::column(app_settings::Column::Key)
                    .update_columns([
                        app_settings::Column::Value,
                        app_settings::Column::Description,
                        app_settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }

    /// Deletes a setting by key. Returns true if one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, key: &str) -> Result<bool, DbErr> {
        let result = app_settings::Entity::delete_many()
            .filter(app_settings::Column::Key.eq(key))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
