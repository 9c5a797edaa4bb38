//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}
//!
//! The list is ordered and idempotent: the migrator tracks applied
//! versions, so re-running it against an initialized store is a no-op.

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_visits_table;
mod m20240101_000003_create_reviews_table;
mod m20240102_000001_add_profile_fields;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_visits_table::Migration),
            Box::new(m20240101_000003_create_reviews_table::Migration),
            Box::new(m20240102_000001_add_profile_fields::Migration),
        ]
    }
}
