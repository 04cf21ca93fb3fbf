//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. Every schema change goes
//! through a versioned migration here; there is no out-of-band path.

pub use sea_orm_migration::prelude::*;

mod m20260801_000001_initial;
mod m20260801_000002_sessions;
mod m20260801_000003_rls;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_initial::Migration),
            Box::new(m20260801_000002_sessions::Migration),
            Box::new(m20260801_000003_rls::Migration),
        ]
    }
}
