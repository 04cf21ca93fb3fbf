//! Pricing repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use triplexa_core::pricing::{MarkupKind, MarkupSlab};

use crate::entities::{markup_slabs, pricing_configurations, sea_orm_active_enums};

/// Errors specific to pricing operations.
#[derive(Debug, Error)]
pub enum PricingRepoError {
    /// Configuration does not exist.
    #[error("pricing configuration not found")]
    NotFound,

    /// No configuration is currently active.
    #[error("no active pricing configuration")]
    NoActiveConfig,

    /// Database failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// One slab of a new configuration, in position order.
#[derive(Debug, Clone)]
pub struct SlabInput {
    /// Inclusive lower bound.
    pub min_amount: Decimal,
    /// Exclusive upper bound; `None` means unbounded.
    pub max_amount: Option<Decimal>,
    /// How the markup is applied.
    pub markup_kind: sea_orm_active_enums::MarkupKind,
    /// Markup value.
    pub markup_value: Decimal,
}

/// Converts stored slab rows into the core engine's slab type.
#[must_use]
pub fn slabs_to_core(rows: &[markup_slabs::Model]) -> Vec<MarkupSlab> {
    rows.iter()
        .map(|row| MarkupSlab {
            min_amount: row.min_amount,
            max_amount: row.max_amount,
            kind: match row.markup_kind {
                sea_orm_active_enums::MarkupKind::Percentage => MarkupKind::Percentage,
                sea_orm_active_enums::MarkupKind::Fixed => MarkupKind::Fixed,
            },
            value: row.markup_value,
        })
        .collect()
}

/// Pricing repository for configurations and slabs.
#[derive(Debug, Clone)]
pub struct PricingRepository {
    db: DatabaseConnection,
}

impl PricingRepository {
    /// Creates a new pricing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the active configuration with its slabs in position order.
    ///
    /// # Errors
    ///
    /// Returns `PricingRepoError::NoActiveConfig` if nothing is active.
    pub async fn active_config_with_slabs(
        &self,
    ) -> Result<(pricing_configurations::Model, Vec<markup_slabs::Model>), PricingRepoError> {
        let config = pricing_configurations::Entity::find()
            .filter(pricing_configurations::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(PricingRepoError::NoActiveConfig)?;

        let slabs = self.slabs_for(config.id).await?;

        Ok((config, slabs))
    }

    /// Finds a configuration with its slabs.
    ///
    /// # Errors
    ///
    /// Returns `PricingRepoError::NotFound` if the configuration does not exist.
    pub async fn find_with_slabs(
        &self,
        id: Uuid,
    ) -> Result<(pricing_configurations::Model, Vec<markup_slabs::Model>), PricingRepoError> {
        let config = pricing_configurations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PricingRepoError::NotFound)?;

        let slabs = self.slabs_for(id).await?;

        Ok((config, slabs))
    }

    /// Lists all configurations, active first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<pricing_configurations::Model>, DbErr> {
        pricing_configurations::Entity::find()
            .order_by_desc(pricing_configurations::Column::IsActive)
            .order_by_asc(pricing_configurations::Column::Name)
            .all(&self.db)
            .await
    }

    /// Creates a configuration with its slabs in one transaction.
    ///
    /// Callers validate the slab set with the core pricing service before
    /// storing it.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is persisted then.
    pub async fn create_with_slabs(
        &self,
        name: &str,
        currency: &str,
        slabs: &[SlabInput],
    ) -> Result<(pricing_configurations::Model, Vec<markup_slabs::Model>), DbErr> {
        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().into();
        let config = pricing_configurations::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            currency: Set(currency.to_string()),
            is_active: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut rows = Vec::with_capacity(slabs.len());
        for (i, slab) in slabs.iter().enumerate() {
            let position = i32::try_from(i).unwrap_or(i32::MAX).saturating_add(1);
            let row = markup_slabs::ActiveModel {
                id: Set(Uuid::new_v4()),
                config_id: Set(config.id),
                position: Set(position),
                min_amount: Set(slab.min_amount),
                max_amount: Set(slab.max_amount),
                markup_kind: Set(slab.markup_kind),
                markup_value: Set(slab.markup_value),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            rows.push(row);
        }

        txn.commit().await?;

        Ok((config, rows))
    }

    /// Makes a configuration the single active one.
    ///
    /// Deactivates the current active configuration first, in the same
    /// transaction, to satisfy the one-active partial unique index.
    ///
    /// # Errors
    ///
    /// Returns `PricingRepoError::NotFound` if the configuration does not exist.
    pub async fn activate(
        &self,
        id: Uuid,
    ) -> Result<pricing_configurations::Model, PricingRepoError> {
        let config = pricing_configurations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PricingRepoError::NotFound)?;

        if config.is_active {
            return Ok(config);
        }

        let txn = self.db.begin().await?;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        pricing_configurations::Entity::update_many()
            .col_expr(
                pricing_configurations::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                pricing_configurations::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(pricing_configurations::Column::IsActive.eq(true))
            .exec(&txn)
            .await?;

        let activated = pricing_configurations::ActiveModel {
            id: Set(id),
            is_active: Set(true),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        Ok(activated)
    }

    /// Replaces a configuration's slabs wholesale, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `PricingRepoError::NotFound` if the configuration does not exist.
    pub async fn replace_slabs(
        &self,
        config_id: Uuid,
        slabs: &[SlabInput],
    ) -> Result<Vec<markup_slabs::Model>, PricingRepoError> {
        pricing_configurations::Entity::find_by_id(config_id)
            .one(&self.db)
            .await?
            .ok_or(PricingRepoError::NotFound)?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        markup_slabs::Entity::delete_many()
            .filter(markup_slabs::Column::ConfigId.eq(config_id))
            .exec(&txn)
            .await?;

        let mut rows = Vec::with_capacity(slabs.len());
        for (i, slab) in slabs.iter().enumerate() {
            let position = i32::try_from(i).unwrap_or(i32::MAX).saturating_add(1);
            let row = markup_slabs::ActiveModel {
                id: Set(Uuid::new_v4()),
                config_id: Set(config_id),
                position: Set(position),
                min_amount: Set(slab.min_amount),
                max_amount: Set(slab.max_amount),
                markup_kind: Set(slab.markup_kind),
                markup_value: Set(slab.markup_value),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            rows.push(row);
        }

        txn.commit().await?;

        Ok(rows)
    }

    async fn slabs_for(&self, config_id: Uuid) -> Result<Vec<markup_slabs::Model>, DbErr> {
        markup_slabs::Entity::find()
            .filter(markup_slabs::Column::ConfigId.eq(config_id))
            .order_by_asc(markup_slabs::Column::Position)
            .all(&self.db)
            .await
    }
}
