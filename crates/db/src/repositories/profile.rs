//! Profile repository for database operations.
//!
//! The upsert here is the single write path for profile provisioning:
//! keyed on `user_id`, so repeated provisioning attempts for the same
//! user converge on one row instead of racing to a duplicate insert.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use triplexa_core::provisioning::ProfileSeed;

use crate::entities::{profiles, sea_orm_active_enums::UserRole, user_roles};

/// Fields that can be changed on an existing profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New phone (`Some(None)` clears it).
    pub phone: Option<Option<String>>,
    /// New company name (`Some(None)` clears it).
    pub company_name: Option<Option<String>>,
    /// New role.
    pub role: Option<UserRole>,
    /// New department (`Some(None)` clears it).
    pub department: Option<Option<String>>,
    /// New position (`Some(None)` clears it).
    pub position: Option<Option<String>>,
}

impl ProfileUpdate {
    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.company_name.is_none()
            && self.role.is_none()
            && self.department.is_none()
            && self.position.is_none()
    }
}

/// Profile repository for CRUD and provisioning operations.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Converts a core role to the database enum.
    #[must_use]
    pub const fn role_from_core(role: triplexa_core::auth::UserRole) -> UserRole {
        match role {
            triplexa_core::auth::UserRole::Admin => UserRole::Admin,
            triplexa_core::auth::UserRole::Manager => UserRole::Manager,
            triplexa_core::auth::UserRole::Staff => UserRole::Staff,
            triplexa_core::auth::UserRole::Agent => UserRole::Agent,
        }
    }

    /// Upserts the profile for a user from a provisioning seed.
    ///
    /// Idempotent: calling twice with the same seed yields the same row.
    /// On conflict the metadata fields are refreshed from the seed, except
    /// `role`, which is never downgraded by a re-provisioning call.
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails.
    pub async fn upsert_for_user(
        &self,
        user_id: Uuid,
        seed: &ProfileSeed,
    ) -> Result<profiles::Model, DbErr> {
        Self::upsert_for_user_on(&self.db, user_id, seed).await
    }

    /// Transaction-aware variant of [`Self::upsert_for_user`], for callers
    /// that provision a profile as part of a larger transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails.
    pub async fn upsert_for_user_on<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        seed: &ProfileSeed,
    ) -> Result<profiles::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let profile = profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(seed.name.clone()),
            phone: Set(seed.phone.clone()),
            company_name: Set(seed.company_name.clone()),
            role: Set(Self::role_from_core(seed.role)),
            department: Set(seed.department.clone()),
            position: Set(seed.position.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        profiles::Entity::insert(profile)
            .on_conflict(
                OnConflict::column(profiles::Column::UserId)
                    .update_columns([
                        profiles::Column::Name,
                        profiles::Column::Phone,
                        profiles::Column::CompanyName,
                        profiles::Column::Department,
                        profiles::Column::Position,
                        profiles::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(conn)
            .await
    }

    /// Finds a profile by its owning user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<profiles::Model>, DbErr> {
        profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Finds a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profiles::Model>, DbErr> {
        profiles::Entity::find_by_id(id).one(&self.db).await
    }

    /// Returns the role recorded for a user, if a profile exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_role(&self, user_id: Uuid) -> Result<Option<UserRole>, DbErr> {
        Ok(self.find_by_user(user_id).await?.map(|p| p.role))
    }

    /// Returns the synced role assignments for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_role_assignments(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<user_roles::Model>, DbErr> {
        user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
    }

    /// Lists profiles, optionally filtered by role, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        role: Option<UserRole>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<profiles::Model>, u64), DbErr> {
        let mut query = profiles::Entity::find();
        if let Some(role) = role {
            query = query.filter(profiles::Column::Role.eq(role));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(profiles::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Applies a partial update to a profile.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the profile does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<profiles::Model, DbErr> {
        let mut model = profiles::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(company_name) = update.company_name {
            model.company_name = Set(company_name);
        }
        if let Some(role) = update.role {
            model.role = Set(role);
        }
        if let Some(department) = update.department {
            model.department = Set(department);
        }
        if let Some(position) = update.position {
            model.position = Set(position);
        }

        model.update(&self.db).await
    }
}
