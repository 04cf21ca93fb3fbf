//! Agent repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

use triplexa_core::provisioning::{ProfileSeed, ProvisioningService, SignupMetadata};

use crate::entities::{agents, sea_orm_active_enums::AgentStatus, users};
use crate::repositories::profile::ProfileRepository;

/// Errors specific to agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Agent does not exist.
    #[error("agent not found")]
    NotFound,

    /// The agency email is already linked to an auth user.
    #[error("agent already has credentials")]
    AlreadyLinked,

    /// The signup email could not be turned into a profile seed.
    #[error("invalid agency email")]
    InvalidEmail,

    /// Database failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Fields that can be changed on an existing agent.
#[derive(Debug, Clone, Default)]
pub struct AgentUpdate {
    /// New agency name.
    pub agency_name: Option<String>,
    /// New contact name.
    pub contact_name: Option<String>,
    /// New phone (`Some(None)` clears it).
    pub phone: Option<Option<String>>,
    /// New city (`Some(None)` clears it).
    pub city: Option<Option<String>>,
    /// New status.
    pub status: Option<AgentStatus>,
}

/// Agent repository for CRUD and credential operations.
#[derive(Debug, Clone)]
pub struct AgentRepository {
    db: DatabaseConnection,
}

impl AgentRepository {
    /// Creates a new agent repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new agent in `pending` status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        agency_name: &str,
        contact_name: &str,
        email: &str,
        phone: Option<&str>,
        city: Option<&str>,
    ) -> Result<agents::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let agent = agents::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(None),
            agency_name: Set(agency_name.to_string()),
            contact_name: Set(contact_name.to_string()),
            email: Set(email.to_string()),
            phone: Set(phone.map(String::from)),
            city: Set(city.map(String::from)),
            status: Set(AgentStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        };

        agent.insert(&self.db).await
    }

    /// Finds an agent by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<agents::Model>, DbErr> {
        agents::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds an agent by agency email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<agents::Model>, DbErr> {
        agents::Entity::find()
            .filter(agents::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds an agent by its linked auth user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<agents::Model>, DbErr> {
        agents::Entity::find()
            .filter(agents::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Finds an agent together with its linked auth user, for login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(agents::Model, Option<users::Model>)>, DbErr> {
        agents::Entity::find()
            .filter(agents::Column::Email.eq(email))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
    }

    /// Lists agents, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        status: Option<AgentStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<agents::Model>, u64), DbErr> {
        let mut query = agents::Entity::find();
        if let Some(status) = status {
            query = query.filter(agents::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(agents::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Applies a partial update to an agent.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the agent does not exist.
    pub async fn update(&self, id: Uuid, update: AgentUpdate) -> Result<agents::Model, DbErr> {
        let mut model = agents::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        if let Some(agency_name) = update.agency_name {
            model.agency_name = Set(agency_name);
        }
        if let Some(contact_name) = update.contact_name {
            model.contact_name = Set(contact_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(city) = update.city {
            model.city = Set(city);
        }
        if let Some(status) = update.status {
            model.status = Set(status);
        }

        model.update(&self.db).await
    }

    /// Sets managed credentials for an agent.
    ///
    /// Creates the auth user with the given password hash, provisions its
    /// profile with role `agent`, links it to the agent row, and activates
    /// the agent. Runs in one transaction so a half-linked agent can never
    /// be observed.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotFound` if the agent does not exist and
    /// `AgentError::AlreadyLinked` if credentials were already set.
    pub async fn set_credentials(
        &self,
        agent_id: Uuid,
        password_hash: &str,
    ) -> Result<agents::Model, AgentError> {
        let agent = self
            .find_by_id(agent_id)
            .await?
            .ok_or(AgentError::NotFound)?;

        if agent.user_id.is_some() {
            return Err(AgentError::AlreadyLinked);
        }

        let metadata = SignupMetadata {
            name: Some(agent.contact_name.clone()),
            phone: agent.phone.clone(),
            company_name: Some(agent.agency_name.clone()),
            role: Some("agent".to_string()),
            ..SignupMetadata::default()
        };
        let seed: ProfileSeed = ProvisioningService::seed_from_signup(&agent.email, &metadata)
            .map_err(|_| AgentError::InvalidEmail)?;

        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(agent.email.clone()),
            password_hash: Set(password_hash.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let user = user.insert(&txn).await?;

        ProfileRepository::upsert_for_user_on(&txn, user.id, &seed).await?;

        let updated = agents::ActiveModel {
            id: Set(agent.id),
            user_id: Set(Some(user.id)),
            status: Set(AgentStatus::Active),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        Ok(updated)
    }
}
