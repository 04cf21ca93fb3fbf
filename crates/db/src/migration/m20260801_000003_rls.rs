//! Row-level security for agent-visible tables.
//!
//! Agents may only see their own quotes and bookings; back-office roles
//! see everything. Context is provided per transaction via
//! `app.current_role` and `app.current_agent_id` (see `crate::rls`).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RLS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_RLS_SQL).await?;
        Ok(())
    }
}

const RLS_SQL: &str = r"
ALTER TABLE quotes ENABLE ROW LEVEL SECURITY;
ALTER TABLE quotes FORCE ROW LEVEL SECURITY;

-- A connection with no context set (migrator, seeder, back-office
-- repositories) keeps full visibility; once a transaction sets an agent
-- context, only that agent's rows are visible.
-- NULLIF handles both an unset GUC (NULL) and the empty string a reset
-- session variable can report.
CREATE POLICY quotes_visibility ON quotes
    USING (
        NULLIF(current_setting('app.current_role', true), '') IS NULL
        OR current_setting('app.current_role', true) IN ('admin', 'manager', 'staff')
        OR agent_id = NULLIF(current_setting('app.current_agent_id', true), '')::uuid
    );

ALTER TABLE sales_bookings ENABLE ROW LEVEL SECURITY;
ALTER TABLE sales_bookings FORCE ROW LEVEL SECURITY;

CREATE POLICY bookings_visibility ON sales_bookings
    USING (
        NULLIF(current_setting('app.current_role', true), '') IS NULL
        OR current_setting('app.current_role', true) IN ('admin', 'manager', 'staff')
        OR quote_id IN (
            SELECT id FROM quotes
            WHERE agent_id = NULLIF(current_setting('app.current_agent_id', true), '')::uuid
        )
    );
";

const DROP_RLS_SQL: &str = r"
DROP POLICY IF EXISTS bookings_visibility ON sales_bookings;
ALTER TABLE sales_bookings DISABLE ROW LEVEL SECURITY;

DROP POLICY IF EXISTS quotes_visibility ON quotes;
ALTER TABLE quotes DISABLE ROW LEVEL SECURITY;
";
