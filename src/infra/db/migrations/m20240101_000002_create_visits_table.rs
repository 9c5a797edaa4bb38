//! Migration: Create the visits table.
//!
//! Visits reference their owning user with ON DELETE CASCADE so that
//! deleting an account removes its exploration history.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Visits::Location).text().not_null())
                    .col(
                        ColumnDef::new(Visits::VisitedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_user_id")
                            .from(Visits::Table, Visits::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the per-user visit listing and count
        manager
            .create_index(
                Index::create()
                    .name("idx_visits_user_id")
                    .table(Visits::Table)
                    .col(Visits::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
    UserId,
    Location,
    VisitedAt,
}
