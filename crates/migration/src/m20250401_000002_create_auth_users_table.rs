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
                    .table(AuthUsers::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthUsers::Id))
                    .col(string_len(AuthUsers::FullName, 255).not_null())
                    .col(string_len(AuthUsers::Email, 255).not_null().unique_key())
                    .col(string_len_null(AuthUsers::MobileNumber, 20))
                    .col(string_len_null(AuthUsers::Qualification, 255))
                    .col(string_len(AuthUsers::Role, 20).not_null())
                    .col(integer_null(AuthUsers::SchoolId))
                    .col(boolean(AuthUsers::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(AuthUsers::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(AuthUsers::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_users_school_id")
                            .from(AuthUsers::Table, AuthUsers::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_auth_users_school_role")
                    .table(AuthUsers::Table)
                    .col(AuthUsers::SchoolId)
                    .col(AuthUsers::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthUsers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AuthUsers {
    Table,
    Id,
    FullName,
    Email,
    MobileNumber,
    Qualification,
    Role,
    SchoolId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
