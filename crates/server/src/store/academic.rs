//! # Academic Store
//!
//! Every friendly conflict message is produced twice: once by a pre-check
//! and once by mapping the matching unique-index violation, so concurrent
//! writers that slip past the pre-check see the same error.

use academics::{
    model::{Assignment, Class, ClassSubject, Enrollment, Id, School, Section, Session, Subject},
    store::{
        roll_order,
        AcademicStore,
        AssignmentChanges,
        AssignmentFilter,
        EnrollmentFilter,
        NewAssignment,
        NewClass,
        NewEnrollment,
        NewSchool,
        NewSection,
        NewSession,
        NewSubject,
        SubjectChanges,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use entity::{
    class_subjects,
    classes,
    schools,
    section_subject_teachers,
    sections,
    sessions,
    student_enrollments,
    subjects,
};
use error::{AppError, Result};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    DatabaseConnection,
    DbErr,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
    SqlErr,
    TransactionTrait,
};
use tracing::debug;

use super::convert;

const SCHOOL_CODE_TAKEN: &str = "School with this code already exists";
const SUBJECT_CODE_TAKEN: &str = "Subject with this code already exists";
const PAIR_TAKEN: &str = "A teacher is already assigned to this section-subject combination";
const ALREADY_ENROLLED: &str = "Student is already enrolled for this session";
const ROLL_TAKEN: &str = "Roll number already taken in this section for this session";

/// [`AcademicStore`] over a Sea-ORM connection pool.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Conflict for a pair another writer claimed between our check and our
    /// insert, naming the teacher who won.
    async fn lost_pair_race(&self, section_id: Id, subject_id: Id) -> AppError {
        match active_assignment(&self.db, section_id, subject_id).await {
            Ok(Some(current)) => pair_conflict(&current),
            Ok(None) => AppError::conflict(PAIR_TAKEN),
            Err(e) => e,
        }
    }
}

/// Report a unique violation as `Conflict(message)`; anything else converts
/// as usual.
fn conflict_on_unique(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            debug!(detail = %detail, "Unique constraint violated");
            AppError::conflict(message)
        },
        _ => err.into(),
    }
}

/// Enrollments carry two unique indexes; only the roll number one names the
/// `roll_number` column.
fn enrollment_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("roll_number") => {
            AppError::conflict(ROLL_TAKEN)
        },
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(ALREADY_ENROLLED),
        _ => err.into(),
    }
}

fn pair_conflict(current: &section_subject_teachers::Model) -> AppError {
    AppError::conflict_with(
        PAIR_TAKEN,
        serde_json::json!({ "currentTeacherId": current.teacher_id }),
    )
}

async fn active_assignment<C: ConnectionTrait>(
    conn: &C,
    section_id: Id,
    subject_id: Id,
) -> Result<Option<section_subject_teachers::Model>> {
    Ok(section_subject_teachers::Entity::find()
        .filter(section_subject_teachers::Column::SectionId.eq(section_id))
        .filter(section_subject_teachers::Column::SubjectId.eq(subject_id))
        .filter(section_subject_teachers::Column::IsActive.eq(true))
        .one(conn)
        .await?)
}

#[async_trait]
impl AcademicStore for SeaOrmStore {
    async fn insert_school(&self, school: NewSchool) -> Result<School> {
        if self.find_school_by_code(&school.code).await?.is_some() {
            return Err(AppError::conflict(SCHOOL_CODE_TAKEN));
        }
        let now = Utc::now();
        let row = schools::ActiveModel {
            code: Set(school.code),
            name: Set(school.name),
            address: Set(school.address),
            phone: Set(school.phone),
            email: Set(school.email),
            base_url: Set(school.base_url),
            logo_path: Set(school.logo_path),
            banner_path: Set(school.banner_path),
            payment_link: Set(school.payment_link),
            principal_name: Set(school.principal_name),
            established_year: Set(school.established_year),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, SCHOOL_CODE_TAKEN))?;
        Ok(convert::school(row))
    }

    async fn find_school_by_code(&self, code: &str) -> Result<Option<School>> {
        Ok(schools::Entity::find()
            .filter(schools::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .map(convert::school))
    }

    async fn insert_session(&self, session: NewSession) -> Result<Session> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        if session.is_active {
            let flipped = sessions::Entity::update_many()
                .col_expr(sessions::Column::IsActive, Expr::value(false))
                .col_expr(sessions::Column::UpdatedAt, Expr::value(now))
                .filter(sessions::Column::SchoolCode.eq(session.school_code.as_str()))
                .filter(sessions::Column::IsActive.eq(true))
                .exec(&txn)
                .await?;
            debug!(school_code = %session.school_code, deactivated = flipped.rows_affected, "Deactivated sibling sessions");
        }
        let row = sessions::ActiveModel {
            school_code: Set(session.school_code),
            name: Set(session.name),
            start_date: Set(session.start_date),
            end_date: Set(session.end_date),
            is_active: Set(session.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| conflict_on_unique(e, "Another session of this school was activated concurrently"))?;
        txn.commit().await?;
        Ok(convert::session(row))
    }

    async fn find_session(&self, id: Id) -> Result<Option<Session>> {
        Ok(sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(convert::session))
    }

    async fn find_active_session(&self, school_code: &str) -> Result<Option<Session>> {
        Ok(sessions::Entity::find()
            .filter(sessions::Column::SchoolCode.eq(school_code))
            .filter(sessions::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .map(convert::session))
    }

    async fn list_sessions(&self, school_code: &str) -> Result<Vec<Session>> {
        let rows = sessions::Entity::find()
            .filter(sessions::Column::SchoolCode.eq(school_code))
            .order_by_desc(sessions::Column::CreatedAt)
            .order_by_desc(sessions::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::session).collect())
    }

    async fn insert_class(&self, class: NewClass) -> Result<Class> {
        let now = Utc::now();
        let row = classes::ActiveModel {
            school_code: Set(class.school_code),
            name: Set(class.name),
            level: Set(class.level),
            description: Set(class.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(convert::class(row))
    }

    async fn find_class(&self, id: Id) -> Result<Option<Class>> {
        Ok(classes::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(convert::class))
    }

    async fn find_classes(&self, ids: &[Id]) -> Result<Vec<Class>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = classes::Entity::find()
            .filter(classes::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::class).collect())
    }

    async fn list_classes(&self, school_code: &str) -> Result<Vec<Class>> {
        let rows = classes::Entity::find()
            .filter(classes::Column::SchoolCode.eq(school_code))
            .filter(classes::Column::IsActive.eq(true))
            .order_by_asc(classes::Column::Level)
            .order_by_asc(classes::Column::Name)
            .order_by_asc(classes::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::class).collect())
    }

    async fn find_active_class_by_name(&self, school_code: &str, name: &str) -> Result<Option<Class>> {
        Ok(classes::Entity::find()
            .filter(classes::Column::SchoolCode.eq(school_code))
            .filter(classes::Column::Name.eq(name))
            .filter(classes::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .map(convert::class))
    }

    async fn insert_section(&self, section: NewSection) -> Result<Section> {
        let now = Utc::now();
        let row = sections::ActiveModel {
            school_code: Set(section.school_code),
            class_id: Set(section.class_id),
            name: Set(section.name),
            capacity: Set(section.capacity),
            class_teacher_id: Set(section.class_teacher_id),
            room: Set(section.room),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(convert::section(row))
    }

    async fn find_section(&self, id: Id) -> Result<Option<Section>> {
        Ok(sections::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(convert::section))
    }

    async fn find_sections(&self, ids: &[Id]) -> Result<Vec<Section>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sections::Entity::find()
            .filter(sections::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::section).collect())
    }

    async fn list_sections(&self, class_ids: &[Id]) -> Result<Vec<Section>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sections::Entity::find()
            .filter(sections::Column::ClassId.is_in(class_ids.to_vec()))
            .filter(sections::Column::IsActive.eq(true))
            .order_by_asc(sections::Column::Name)
            .order_by_asc(sections::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::section).collect())
    }

    async fn list_school_sections(&self, school_code: &str) -> Result<Vec<Section>> {
        let rows = sections::Entity::find()
            .filter(sections::Column::SchoolCode.eq(school_code))
            .filter(sections::Column::IsActive.eq(true))
            .order_by_asc(sections::Column::Name)
            .order_by_asc(sections::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::section).collect())
    }

    async fn find_active_section_by_name(&self, class_id: Id, name: &str) -> Result<Option<Section>> {
        Ok(sections::Entity::find()
            .filter(sections::Column::ClassId.eq(class_id))
            .filter(sections::Column::Name.eq(name))
            .filter(sections::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .map(convert::section))
    }

    async fn insert_subject(&self, subject: NewSubject) -> Result<Subject> {
        let now = Utc::now();
        let row = subjects::ActiveModel {
            school_code: Set(subject.school_code),
            name: Set(subject.name),
            code: Set(subject.code),
            description: Set(subject.description),
            is_active: Set(subject.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, SUBJECT_CODE_TAKEN))?;
        Ok(convert::subject(row))
    }

    async fn find_subject(&self, id: Id) -> Result<Option<Subject>> {
        Ok(subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(convert::subject))
    }

    async fn find_subjects(&self, ids: &[Id]) -> Result<Vec<Subject>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::subject).collect())
    }

    async fn find_active_subject_by_code(
        &self,
        school_code: &str,
        code: &str,
        exclude: Option<Id>,
    ) -> Result<Option<Subject>> {
        let mut query = subjects::Entity::find()
            .filter(subjects::Column::SchoolCode.eq(school_code))
            .filter(subjects::Column::Code.eq(code))
            .filter(subjects::Column::IsActive.eq(true));
        if let Some(id) = exclude {
            query = query.filter(subjects::Column::Id.ne(id));
        }
        Ok(query.one(&self.db).await?.map(convert::subject))
    }

    async fn list_subjects(&self, school_code: &str, include_inactive: bool) -> Result<Vec<Subject>> {
        let mut query = subjects::Entity::find().filter(subjects::Column::SchoolCode.eq(school_code));
        if !include_inactive {
            query = query.filter(subjects::Column::IsActive.eq(true));
        }
        let rows = query
            .order_by_asc(subjects::Column::Name)
            .order_by_asc(subjects::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::subject).collect())
    }

    async fn update_subject(&self, id: Id, changes: SubjectChanges) -> Result<Subject> {
        let row = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))?;

        let mut active: subjects::ActiveModel = row.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(code) = changes.code {
            active.code = Set(Some(code));
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());
        let row = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_on_unique(e, SUBJECT_CODE_TAKEN))?;
        Ok(convert::subject(row))
    }

    async fn delete_subject(&self, id: Id, hard: bool) -> Result<()> {
        let row = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))?;

        if !hard {
            let mut active: subjects::ActiveModel = row.into();
            active.is_active = Set(false);
            active.updated_at = Set(Utc::now());
            active.update(&self.db).await?;
            return Ok(());
        }

        let referenced = section_subject_teachers::Entity::find()
            .filter(section_subject_teachers::Column::SubjectId.eq(id))
            .count(&self.db)
            .await?;
        if referenced > 0 {
            return Err(AppError::conflict("Resource is still referenced"));
        }

        let txn = self.db.begin().await?;
        class_subjects::Entity::delete_many()
            .filter(class_subjects::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        subjects::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn add_class_subjects(&self, class_id: Id, subject_ids: &[Id]) -> Result<()> {
        if subject_ids.is_empty() {
            return Ok(());
        }
        let txn = self.db.begin().await?;
        let existing: Vec<Id> = class_subjects::Entity::find()
            .filter(class_subjects::Column::ClassId.eq(class_id))
            .filter(class_subjects::Column::SubjectId.is_in(subject_ids.to_vec()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.subject_id)
            .collect();

        let now = Utc::now();
        for &subject_id in subject_ids.iter().filter(|id| !existing.contains(id)) {
            class_subjects::ActiveModel {
                class_id: Set(class_id),
                subject_id: Set(subject_id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| conflict_on_unique(e, "Subject is already offered by this class"))?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn remove_class_subject(&self, class_id: Id, subject_id: Id) -> Result<bool> {
        let result = class_subjects::Entity::delete_many()
            .filter(class_subjects::Column::ClassId.eq(class_id))
            .filter(class_subjects::Column::SubjectId.eq(subject_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_class_subjects(&self, class_ids: &[Id]) -> Result<Vec<ClassSubject>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = class_subjects::Entity::find()
            .filter(class_subjects::Column::ClassId.is_in(class_ids.to_vec()))
            .order_by_asc(class_subjects::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::class_subject).collect())
    }

    async fn list_subject_classes(&self, subject_id: Id) -> Result<Vec<ClassSubject>> {
        let rows = class_subjects::Entity::find()
            .filter(class_subjects::Column::SubjectId.eq(subject_id))
            .order_by_asc(class_subjects::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::class_subject).collect())
    }

    async fn insert_assignments(&self, batch: Vec<NewAssignment>) -> Result<Vec<Assignment>> {
        let txn = self.db.begin().await?;
        for (index, entry) in batch.iter().enumerate() {
            if let Some(current) = active_assignment(&txn, entry.section_id, entry.subject_id).await? {
                return Err(pair_conflict(&current));
            }
            let repeated = batch[.. index]
                .iter()
                .any(|e| e.section_id == entry.section_id && e.subject_id == entry.subject_id);
            if repeated {
                return Err(AppError::conflict("Duplicate section-subject combination in request"));
            }
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(batch.len());
        for entry in batch {
            let row = section_subject_teachers::ActiveModel {
                section_id: Set(entry.section_id),
                subject_id: Set(entry.subject_id),
                teacher_id: Set(entry.teacher_id),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await;
            let row = match row {
                Ok(row) => row,
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    txn.rollback().await?;
                    return Err(self.lost_pair_race(entry.section_id, entry.subject_id).await);
                },
                Err(e) => return Err(e.into()),
            };
            created.push(convert::assignment(row));
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn find_assignment(&self, id: Id) -> Result<Option<Assignment>> {
        Ok(section_subject_teachers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(convert::assignment))
    }

    async fn find_active_assignment(&self, section_id: Id, subject_id: Id) -> Result<Option<Assignment>> {
        Ok(active_assignment(&self.db, section_id, subject_id)
            .await?
            .map(convert::assignment))
    }

    async fn update_assignment(&self, id: Id, changes: AssignmentChanges) -> Result<Assignment> {
        let txn = self.db.begin().await?;
        let row = section_subject_teachers::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        if changes.is_active.unwrap_or(row.is_active) {
            if let Some(other) = active_assignment(&txn, row.section_id, row.subject_id)
                .await?
                .filter(|a| a.id != id)
            {
                return Err(pair_conflict(&other));
            }
        }

        let (section_id, subject_id) = (row.section_id, row.subject_id);
        let mut active: section_subject_teachers::ActiveModel = row.into();
        if let Some(teacher_id) = changes.teacher_id {
            active.teacher_id = Set(teacher_id);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());
        let updated = match active.update(&txn).await {
            Ok(row) => row,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback().await?;
                return Err(self.lost_pair_race(section_id, subject_id).await);
            },
            Err(e) => return Err(e.into()),
        };
        txn.commit().await?;
        Ok(convert::assignment(updated))
    }

    async fn delete_assignment(&self, id: Id, hard: bool) -> Result<()> {
        if hard {
            section_subject_teachers::Entity::delete_by_id(id)
                .exec(&self.db)
                .await?;
        }
        else {
            section_subject_teachers::Entity::update_many()
                .col_expr(section_subject_teachers::Column::IsActive, Expr::value(false))
                .col_expr(section_subject_teachers::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(section_subject_teachers::Column::Id.eq(id))
                .exec(&self.db)
                .await?;
        }
        Ok(())
    }

    async fn list_assignments(&self, filter: AssignmentFilter) -> Result<Vec<Assignment>> {
        let mut query =
            section_subject_teachers::Entity::find().filter(section_subject_teachers::Column::IsActive.eq(true));
        if let Some(id) = filter.teacher_id {
            query = query.filter(section_subject_teachers::Column::TeacherId.eq(id));
        }
        if let Some(id) = filter.subject_id {
            query = query.filter(section_subject_teachers::Column::SubjectId.eq(id));
        }
        if let Some(id) = filter.section_id {
            query = query.filter(section_subject_teachers::Column::SectionId.eq(id));
        }
        if filter.class_id.is_some() || filter.school_code.is_some() {
            query = query.inner_join(sections::Entity);
            if let Some(id) = filter.class_id {
                query = query.filter(sections::Column::ClassId.eq(id));
            }
            if let Some(code) = filter.school_code {
                query = query.filter(sections::Column::SchoolCode.eq(code));
            }
        }
        let rows = logging::measure_duration!("store", "list_assignments", {
            query
                .order_by_asc(section_subject_teachers::Column::Id)
                .all(&self.db)
                .await?
        });
        Ok(rows.into_iter().map(convert::assignment).collect())
    }

    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> Result<Enrollment> {
        let enrolled = student_enrollments::Entity::find()
            .filter(student_enrollments::Column::StudentId.eq(enrollment.student_id))
            .filter(student_enrollments::Column::SessionId.eq(enrollment.session_id))
            .count(&self.db)
            .await?;
        if enrolled > 0 {
            return Err(AppError::conflict(ALREADY_ENROLLED));
        }
        if let Some(roll) = enrollment.roll_number.as_deref() {
            let taken = student_enrollments::Entity::find()
                .filter(student_enrollments::Column::SessionId.eq(enrollment.session_id))
                .filter(student_enrollments::Column::SectionId.eq(enrollment.section_id))
                .filter(student_enrollments::Column::RollNumber.eq(roll))
                .count(&self.db)
                .await?;
            if taken > 0 {
                return Err(AppError::conflict(ROLL_TAKEN));
            }
        }

        let now = Utc::now();
        let row = student_enrollments::ActiveModel {
            student_id: Set(enrollment.student_id),
            session_id: Set(enrollment.session_id),
            class_id: Set(enrollment.class_id),
            section_id: Set(enrollment.section_id),
            roll_number: Set(enrollment.roll_number),
            admission_number: Set(enrollment.admission_number),
            enrollment_date: Set(enrollment.enrollment_date),
            status: Set(convert::db_status(enrollment.status)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(enrollment_conflict)?;
        Ok(convert::enrollment(row))
    }

    async fn list_enrollments(&self, filter: EnrollmentFilter) -> Result<Vec<Enrollment>> {
        let mut query =
            student_enrollments::Entity::find().filter(student_enrollments::Column::IsActive.eq(true));
        if let Some(ids) = filter.section_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            query = query.filter(student_enrollments::Column::SectionId.is_in(ids));
        }
        if let Some(id) = filter.session_id {
            query = query.filter(student_enrollments::Column::SessionId.eq(id));
        }
        let mut enrollments: Vec<Enrollment> = query
            .all(&self.db)
            .await?
            .into_iter()
            .map(convert::enrollment)
            .collect();
        enrollments.sort_by(roll_order);
        Ok(enrollments)
    }
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait as _};
    use sea_orm::Database;

    use super::*;

    const SEED: [&str; 6] = [
        "INSERT INTO schools (code, name) VALUES ('DPS001', 'Delhi Public School')",
        "INSERT INTO auth_users (full_name, email, role, school_id) VALUES ('Priya Sharma', 'priya@dps.in', 'teacher', 1)",
        "INSERT INTO classes (school_code, name, level) VALUES ('DPS001', 'Class 1', 1)",
        "INSERT INTO sections (school_code, class_id, name) VALUES ('DPS001', 1, 'A')",
        "INSERT INTO subjects (school_code, name, code) VALUES ('DPS001', 'Mathematics', 'MATH')",
        "INSERT INTO subjects (school_code, name, code) VALUES ('DPS001', 'Science', 'SCI')",
    ];

    #[tokio::test]
    async fn test_lost_pair_race_names_the_winning_teacher() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        for sql in SEED {
            db.execute_unprepared(sql).await.unwrap();
        }
        db.execute_unprepared("INSERT INTO section_subject_teachers (section_id, subject_id, teacher_id) VALUES (1, 1, 1)")
            .await
            .unwrap();
        let store = SeaOrmStore::new(db);

        let err = store.lost_pair_race(1, 1).await;
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.message(), PAIR_TAKEN);
        assert_eq!(err.details().unwrap()["currentTeacherId"], 1);

        // The winner may already be gone again; the conflict still stands.
        let err = store.lost_pair_race(1, 2).await;
        assert_eq!(err.code(), "CONFLICT");
        assert!(err.details().is_none());
    }
}
