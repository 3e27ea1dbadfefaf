use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250401_000002_create_auth_users_table::AuthUsers,
    m20250401_000004_create_classes_and_sections_tables::Sections,
    m20250401_000005_create_subjects_tables::Subjects,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SectionSubjectTeachers::Table)
                    .if_not_exists()
                    .col(pk_auto(SectionSubjectTeachers::Id))
                    .col(integer(SectionSubjectTeachers::SectionId).not_null())
                    .col(integer(SectionSubjectTeachers::SubjectId).not_null())
                    .col(integer(SectionSubjectTeachers::TeacherId).not_null())
                    .col(
                        boolean(SectionSubjectTeachers::IsActive)
                            .not_null()
                            .default(true),
                    )
                    .col(
                        timestamp_with_time_zone(SectionSubjectTeachers::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(SectionSubjectTeachers::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_subject_teachers_section_id")
                            .from(SectionSubjectTeachers::Table, SectionSubjectTeachers::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_subject_teachers_subject_id")
                            .from(SectionSubjectTeachers::Table, SectionSubjectTeachers::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_subject_teachers_teacher_id")
                            .from(SectionSubjectTeachers::Table, SectionSubjectTeachers::TeacherId)
                            .to(AuthUsers::Table, AuthUsers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One active teacher per section-subject pair
        manager
            .get_connection()
            .execute_unprepared(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "idx_section_subject_teachers_active_pair" ON "section_subject_teachers" ("section_id", "subject_id") WHERE "is_active""#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_section_subject_teachers_teacher_id")
                    .table(SectionSubjectTeachers::Table)
                    .col(SectionSubjectTeachers::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SectionSubjectTeachers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SectionSubjectTeachers {
    Table,
    Id,
    SectionId,
    SubjectId,
    TeacherId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
