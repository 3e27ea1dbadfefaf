use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250401_000001_create_schools_table::Schools;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(pk_auto(Sessions::Id))
                    .col(string_len(Sessions::SchoolCode, 50).not_null())
                    .col(string_len(Sessions::Name, 100).not_null())
                    .col(date(Sessions::StartDate).not_null())
                    .col(date(Sessions::EndDate).not_null())
                    .col(boolean(Sessions::IsActive).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Sessions::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Sessions::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_school_code")
                            .from(Sessions::Table, Sessions::SchoolCode)
                            .to(Schools::Table, Schools::Code)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one active session per school
        manager
            .get_connection()
            .execute_unprepared(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "idx_sessions_one_active_per_school" ON "sessions" ("school_code") WHERE "is_active""#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Sessions {
    Table,
    Id,
    SchoolCode,
    Name,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
