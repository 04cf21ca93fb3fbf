//! Row-Level Security (RLS) context management.
//!
//! This module provides utilities for setting `PostgreSQL` RLS context
//! per request so that agent-originated queries only see the agent's own
//! rows. Connections that never set a context keep full visibility.
//!
//! # Usage
//!
//! ```ignore
//! use triplexa_db::rls::RlsConnection;
//!
//! // In your handler, for an agent-scoped request:
//! let rls = RlsConnection::for_agent(&db, agent_id).await?;
//! let quotes = Quote::find().all(rls.transaction()).await?;
//! rls.commit().await?;
//! ```

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use uuid::Uuid;

/// A database connection wrapper that sets RLS context for agent isolation.
///
/// Wraps a database transaction and sets the session variables
/// `app.current_role` and `app.current_agent_id` with `SET LOCAL`, scoping
/// them to the transaction.
pub struct RlsConnection {
    txn: DatabaseTransaction,
}

impl RlsConnection {
    /// Creates an RLS-enabled connection scoped to a single agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the RLS
    /// context cannot be set.
    pub async fn for_agent(db: &DatabaseConnection, agent_id: Uuid) -> Result<Self, DbErr> {
        let txn = db.begin().await?;

        // SET LOCAL scopes the settings to this transaction only
        txn.execute_unprepared("SET LOCAL app.current_role = 'agent'")
            .await?;
        let sql = format!("SET LOCAL app.current_agent_id = '{agent_id}'");
        txn.execute_unprepared(&sql).await?;

        tracing::debug!(agent_id = %agent_id, "RLS context set");

        Ok(Self { txn })
    }

    /// Returns a reference to the underlying transaction for executing queries.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Rolls back the transaction, discarding all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}
