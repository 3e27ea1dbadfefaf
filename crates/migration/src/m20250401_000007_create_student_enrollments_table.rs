use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250401_000002_create_auth_users_table::AuthUsers,
    m20250401_000003_create_sessions_table::Sessions,
    m20250401_000004_create_classes_and_sections_tables::{Classes, Sections},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentEnrollments::Table)
                    .if_not_exists()
                    .col(pk_auto(StudentEnrollments::Id))
                    .col(integer(StudentEnrollments::StudentId).not_null())
                    .col(integer(StudentEnrollments::SessionId).not_null())
                    .col(integer(StudentEnrollments::ClassId).not_null())
                    .col(integer(StudentEnrollments::SectionId).not_null())
                    .col(string_len_null(StudentEnrollments::RollNumber, 20))
                    .col(string_len_null(StudentEnrollments::AdmissionNumber, 50))
                    .col(date(StudentEnrollments::EnrollmentDate).not_null())
                    .col(
                        string_len(StudentEnrollments::Status, 20)
                            .not_null()
                            .default("active"),
                    )
                    .col(boolean(StudentEnrollments::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(StudentEnrollments::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(StudentEnrollments::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_enrollments_student_id")
                            .from(StudentEnrollments::Table, StudentEnrollments::StudentId)
                            .to(AuthUsers::Table, AuthUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_enrollments_session_id")
                            .from(StudentEnrollments::Table, StudentEnrollments::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_enrollments_class_id")
                            .from(StudentEnrollments::Table, StudentEnrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_enrollments_section_id")
                            .from(StudentEnrollments::Table, StudentEnrollments::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One enrollment per student per session
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_enrollments_student_session")
                    .table(StudentEnrollments::Table)
                    .col(StudentEnrollments::StudentId)
                    .col(StudentEnrollments::SessionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Roll numbers are unique within a section for a session
        manager
            .get_connection()
            .execute_unprepared(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "idx_student_enrollments_roll_number" ON "student_enrollments" ("session_id", "section_id", "roll_number") WHERE "roll_number" IS NOT NULL"#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_enrollments_section_session")
                    .table(StudentEnrollments::Table)
                    .col(StudentEnrollments::SectionId)
                    .col(StudentEnrollments::SessionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentEnrollments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum StudentEnrollments {
    Table,
    Id,
    StudentId,
    SessionId,
    ClassId,
    SectionId,
    RollNumber,
    AdmissionNumber,
    EnrollmentDate,
    Status,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
