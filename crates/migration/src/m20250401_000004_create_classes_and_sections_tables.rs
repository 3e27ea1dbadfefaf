use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250401_000001_create_schools_table::Schools, m20250401_000002_create_auth_users_table::AuthUsers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(pk_auto(Classes::Id))
                    .col(string_len(Classes::SchoolCode, 50).not_null())
                    .col(string_len(Classes::Name, 100).not_null())
                    .col(integer(Classes::Level).not_null())
                    .col(text_null(Classes::Description))
                    .col(boolean(Classes::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Classes::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Classes::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_classes_school_code")
                            .from(Classes::Table, Classes::SchoolCode)
                            .to(Schools::Table, Schools::Code)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_school_code")
                    .table(Classes::Table)
                    .col(Classes::SchoolCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(pk_auto(Sections::Id))
                    .col(string_len(Sections::SchoolCode, 50).not_null())
                    .col(integer(Sections::ClassId).not_null())
                    .col(string_len(Sections::Name, 50).not_null())
                    .col(integer(Sections::Capacity).not_null().default(30))
                    .col(integer_null(Sections::ClassTeacherId))
                    .col(string_len_null(Sections::Room, 50))
                    .col(boolean(Sections::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Sections::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Sections::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_class_id")
                            .from(Sections::Table, Sections::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_class_teacher_id")
                            .from(Sections::Table, Sections::ClassTeacherId)
                            .to(AuthUsers::Table, AuthUsers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sections_class_id")
                    .table(Sections::Table)
                    .col(Sections::ClassId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Classes {
    Table,
    Id,
    SchoolCode,
    Name,
    Level,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Sections {
    Table,
    Id,
    SchoolCode,
    ClassId,
    Name,
    Capacity,
    ClassTeacherId,
    Room,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
