use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250401_000001_create_schools_table::Schools, m20250401_000004_create_classes_and_sections_tables::Classes};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(pk_auto(Subjects::Id))
                    .col(string_len(Subjects::SchoolCode, 50).not_null())
                    .col(string_len(Subjects::Name, 100).not_null())
                    .col(string_len_null(Subjects::Code, 20))
                    .col(text_null(Subjects::Description))
                    .col(boolean(Subjects::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Subjects::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Subjects::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subjects_school_code")
                            .from(Subjects::Table, Subjects::SchoolCode)
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
                    .name("idx_subjects_school_code")
                    .table(Subjects::Table)
                    .col(Subjects::SchoolCode)
                    .to_owned(),
            )
            .await?;

        // Subject codes are unique among the active subjects of a school
        manager
            .get_connection()
            .execute_unprepared(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "idx_subjects_active_code_per_school" ON "subjects" ("school_code", "code") WHERE "is_active" AND "code" IS NOT NULL"#,
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClassSubjects::Table)
                    .if_not_exists()
                    .col(pk_auto(ClassSubjects::Id))
                    .col(integer(ClassSubjects::ClassId).not_null())
                    .col(integer(ClassSubjects::SubjectId).not_null())
                    .col(
                        timestamp_with_time_zone(ClassSubjects::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_subjects_class_id")
                            .from(ClassSubjects::Table, ClassSubjects::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_subjects_subject_id")
                            .from(ClassSubjects::Table, ClassSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A subject appears at most once in a class catalog
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_subjects_class_subject_unique")
                    .table(ClassSubjects::Table)
                    .col(ClassSubjects::ClassId)
                    .col(ClassSubjects::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Subjects {
    Table,
    Id,
    SchoolCode,
    Name,
    Code,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ClassSubjects {
    Table,
    Id,
    ClassId,
    SubjectId,
    CreatedAt,
}
