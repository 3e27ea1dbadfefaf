//! # In-Memory Store
//!
//! [`AcademicStore`] and [`IdentityDirectory`] over plain vectors behind one
//! async lock. Every write takes the lock exclusively, which makes each trait
//! method atomic, and the same unique constraints as the database schema are
//! checked under it.

use async_trait::async_trait;
use chrono::Utc;
use error::{AppError, Result};
use tokio::sync::RwLock;

use crate::{
    identity::{IdentityDirectory, UserSummary},
    model::{Assignment, Class, ClassSubject, Enrollment, Id, School, Section, Session, Subject},
    store::{
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
        roll_order,
    },
};

#[derive(Default)]
struct Tables {
    next_id:        Id,
    schools:        Vec<School>,
    sessions:       Vec<Session>,
    classes:        Vec<Class>,
    sections:       Vec<Section>,
    subjects:       Vec<Subject>,
    class_subjects: Vec<ClassSubject>,
    assignments:    Vec<Assignment>,
    enrollments:    Vec<Enrollment>,
    users:          Vec<UserSummary>,
}

impl Tables {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    fn section(&self, id: Id) -> Option<&Section> { self.sections.iter().find(|s| s.id == id) }

    fn active_assignment(&self, section_id: Id, subject_id: Id) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.is_active && a.section_id == section_id && a.subject_id == subject_id)
    }

    /// Mirrors the partial unique index on active subject codes.
    fn ensure_subject_code_free(&self, school_code: &str, code: Option<&str>, exclude: Option<Id>) -> Result<()> {
        let Some(code) = code else {
            return Ok(());
        };
        let taken = self.subjects.iter().any(|s| {
            s.is_active && s.school_code == school_code && s.code.as_deref() == Some(code) && Some(s.id) != exclude
        });
        if taken {
            return Err(AppError::conflict("Subject with this code already exists"));
        }
        Ok(())
    }
}

/// Store used by tests and local runs without a database.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Register a user in the directory, replacing one with the same id.
    pub async fn add_user(&self, user: UserSummary) {
        let mut tables = self.tables.write().await;
        tables.users.retain(|u| u.id != user.id);
        tables.users.push(user);
    }

    /// Flip the active flag of a directory user.
    pub async fn set_user_active(&self, id: Id, is_active: bool) {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.is_active = is_active;
        }
    }
}

fn by_ids<T: Clone>(rows: &[T], ids: &[Id], id: impl Fn(&T) -> Id) -> Vec<T> {
    rows.iter().filter(|r| ids.contains(&id(r))).cloned().collect()
}


#[async_trait]
impl AcademicStore for MemoryStore {
    async fn insert_school(&self, school: NewSchool) -> Result<School> {
        let mut tables = self.tables.write().await;
        if tables.schools.iter().any(|s| s.code == school.code) {
            return Err(AppError::conflict("School with this code already exists"));
        }
        let now = Utc::now();
        let row = School {
            id:               tables.next_id(),
            code:             school.code,
            name:             school.name,
            address:          school.address,
            phone:            school.phone,
            email:            school.email,
            base_url:         school.base_url,
            logo_path:        school.logo_path,
            banner_path:      school.banner_path,
            payment_link:     school.payment_link,
            principal_name:   school.principal_name,
            established_year: school.established_year,
            is_active:        true,
            created_at:       now,
            updated_at:       now,
        };
        tables.schools.push(row.clone());
        Ok(row)
    }

    async fn find_school_by_code(&self, code: &str) -> Result<Option<School>> {
        let tables = self.tables.read().await;
        Ok(tables.schools.iter().find(|s| s.code == code).cloned())
    }

    async fn insert_session(&self, session: NewSession) -> Result<Session> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        if session.is_active {
            for sibling in tables
                .sessions
                .iter_mut()
                .filter(|s| s.school_code == session.school_code && s.is_active)
            {
                sibling.is_active = false;
                sibling.updated_at = now;
            }
        }
        let row = Session {
            id:          tables.next_id(),
            school_code: session.school_code,
            name:        session.name,
            start_date:  session.start_date,
            end_date:    session.end_date,
            is_active:   session.is_active,
            created_at:  now,
            updated_at:  now,
        };
        tables.sessions.push(row.clone());
        Ok(row)
    }

    async fn find_session(&self, id: Id) -> Result<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_active_session(&self, school_code: &str) -> Result<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.school_code == school_code && s.is_active)
            .cloned())
    }

    async fn list_sessions(&self, school_code: &str) -> Result<Vec<Session>> {
        let tables = self.tables.read().await;
        let mut sessions: Vec<Session> = tables
            .sessions
            .iter()
            .filter(|s| s.school_code == school_code)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(sessions)
    }

    async fn insert_class(&self, class: NewClass) -> Result<Class> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let row = Class {
            id:          tables.next_id(),
            school_code: class.school_code,
            name:        class.name,
            level:       class.level,
            description: class.description,
            is_active:   true,
            created_at:  now,
            updated_at:  now,
        };
        tables.classes.push(row.clone());
        Ok(row)
    }

    async fn find_class(&self, id: Id) -> Result<Option<Class>> {
        let tables = self.tables.read().await;
        Ok(tables.classes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_classes(&self, ids: &[Id]) -> Result<Vec<Class>> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.classes, ids, |c| c.id))
    }

    async fn list_classes(&self, school_code: &str) -> Result<Vec<Class>> {
        let tables = self.tables.read().await;
        let mut classes: Vec<Class> = tables
            .classes
            .iter()
            .filter(|c| c.school_code == school_code && c.is_active)
            .cloned()
            .collect();
        classes.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        Ok(classes)
    }

    async fn find_active_class_by_name(&self, school_code: &str, name: &str) -> Result<Option<Class>> {
        let tables = self.tables.read().await;
        Ok(tables
            .classes
            .iter()
            .find(|c| c.is_active && c.school_code == school_code && c.name == name)
            .cloned())
    }

    async fn insert_section(&self, section: NewSection) -> Result<Section> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let row = Section {
            id:               tables.next_id(),
            school_code:      section.school_code,
            class_id:         section.class_id,
            name:             section.name,
            capacity:         section.capacity,
            class_teacher_id: section.class_teacher_id,
            room:             section.room,
            is_active:        true,
            created_at:       now,
            updated_at:       now,
        };
        tables.sections.push(row.clone());
        Ok(row)
    }

    async fn find_section(&self, id: Id) -> Result<Option<Section>> {
        let tables = self.tables.read().await;
        Ok(tables.section(id).cloned())
    }

    async fn find_sections(&self, ids: &[Id]) -> Result<Vec<Section>> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.sections, ids, |s| s.id))
    }

    async fn list_sections(&self, class_ids: &[Id]) -> Result<Vec<Section>> {
        let tables = self.tables.read().await;
        let mut sections: Vec<Section> = tables
            .sections
            .iter()
            .filter(|s| s.is_active && class_ids.contains(&s.class_id))
            .cloned()
            .collect();
        sections.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(sections)
    }

    async fn list_school_sections(&self, school_code: &str) -> Result<Vec<Section>> {
        let tables = self.tables.read().await;
        let mut sections: Vec<Section> = tables
            .sections
            .iter()
            .filter(|s| s.is_active && s.school_code == school_code)
            .cloned()
            .collect();
        sections.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(sections)
    }

    async fn find_active_section_by_name(&self, class_id: Id, name: &str) -> Result<Option<Section>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sections
            .iter()
            .find(|s| s.is_active && s.class_id == class_id && s.name == name)
            .cloned())
    }

    async fn insert_subject(&self, subject: NewSubject) -> Result<Subject> {
        let mut tables = self.tables.write().await;
        if subject.is_active {
            tables.ensure_subject_code_free(&subject.school_code, subject.code.as_deref(), None)?;
        }
        let now = Utc::now();
        let row = Subject {
            id:          tables.next_id(),
            school_code: subject.school_code,
            name:        subject.name,
            code:        subject.code,
            description: subject.description,
            is_active:   subject.is_active,
            created_at:  now,
            updated_at:  now,
        };
        tables.subjects.push(row.clone());
        Ok(row)
    }

    async fn find_subject(&self, id: Id) -> Result<Option<Subject>> {
        let tables = self.tables.read().await;
        Ok(tables.subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn find_subjects(&self, ids: &[Id]) -> Result<Vec<Subject>> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.subjects, ids, |s| s.id))
    }

    async fn find_active_subject_by_code(
        &self,
        school_code: &str,
        code: &str,
        exclude: Option<Id>,
    ) -> Result<Option<Subject>> {
        let tables = self.tables.read().await;
        Ok(tables
            .subjects
            .iter()
            .find(|s| {
                s.is_active &&
                    s.school_code == school_code &&
                    s.code.as_deref() == Some(code) &&
                    Some(s.id) != exclude
            })
            .cloned())
    }

    async fn list_subjects(&self, school_code: &str, include_inactive: bool) -> Result<Vec<Subject>> {
        let tables = self.tables.read().await;
        let mut subjects: Vec<Subject> = tables
            .subjects
            .iter()
            .filter(|s| s.school_code == school_code && (include_inactive || s.is_active))
            .cloned()
            .collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(subjects)
    }

    async fn update_subject(&self, id: Id, changes: SubjectChanges) -> Result<Subject> {
        let mut tables = self.tables.write().await;
        let current = tables
            .subjects
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found("Subject not found"))?;
        let will_be_active = changes.is_active.unwrap_or(current.is_active);
        let code = changes.code.clone().or_else(|| current.code.clone());
        let school_code = current.school_code.clone();
        if will_be_active {
            tables.ensure_subject_code_free(&school_code, code.as_deref(), Some(id))?;
        }

        let subject = tables
            .subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found("Subject not found"))?;
        if let Some(name) = changes.name {
            subject.name = name;
        }
        if let Some(code) = changes.code {
            subject.code = Some(code);
        }
        if let Some(description) = changes.description {
            subject.description = Some(description);
        }
        if let Some(is_active) = changes.is_active {
            subject.is_active = is_active;
        }
        subject.updated_at = Utc::now();
        Ok(subject.clone())
    }

    async fn delete_subject(&self, id: Id, hard: bool) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.subjects.iter().any(|s| s.id == id) {
            return Err(AppError::not_found("Subject not found"));
        }
        if hard {
            if tables.assignments.iter().any(|a| a.subject_id == id) {
                return Err(AppError::conflict("Resource is still referenced"));
            }
            tables.class_subjects.retain(|l| l.subject_id != id);
            tables.subjects.retain(|s| s.id != id);
        }
        else if let Some(subject) = tables.subjects.iter_mut().find(|s| s.id == id) {
            subject.is_active = false;
            subject.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn add_class_subjects(&self, class_id: Id, subject_ids: &[Id]) -> Result<()> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        for &subject_id in subject_ids {
            let exists = tables
                .class_subjects
                .iter()
                .any(|l| l.class_id == class_id && l.subject_id == subject_id);
            if !exists {
                let id = tables.next_id();
                tables.class_subjects.push(ClassSubject {
                    id,
                    class_id,
                    subject_id,
                    created_at: now,
                });
            }
        }
        Ok(())
    }

    async fn remove_class_subject(&self, class_id: Id, subject_id: Id) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.class_subjects.len();
        tables
            .class_subjects
            .retain(|l| !(l.class_id == class_id && l.subject_id == subject_id));
        Ok(tables.class_subjects.len() != before)
    }

    async fn list_class_subjects(&self, class_ids: &[Id]) -> Result<Vec<ClassSubject>> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.class_subjects, class_ids, |l| l.class_id))
    }

    async fn list_subject_classes(&self, subject_id: Id) -> Result<Vec<ClassSubject>> {
        let tables = self.tables.read().await;
        Ok(tables
            .class_subjects
            .iter()
            .filter(|l| l.subject_id == subject_id)
            .cloned()
            .collect())
    }

    async fn insert_assignments(&self, batch: Vec<NewAssignment>) -> Result<Vec<Assignment>> {
        let mut tables = self.tables.write().await;
        for (index, entry) in batch.iter().enumerate() {
            if let Some(current) = tables.active_assignment(entry.section_id, entry.subject_id) {
                return Err(AppError::conflict_with(
                    "A teacher is already assigned to this section-subject combination",
                    serde_json::json!({ "currentTeacherId": current.teacher_id }),
                ));
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
            let row = Assignment {
                id:         tables.next_id(),
                section_id: entry.section_id,
                subject_id: entry.subject_id,
                teacher_id: entry.teacher_id,
                is_active:  true,
                created_at: now,
                updated_at: now,
            };
            tables.assignments.push(row.clone());
            created.push(row);
        }
        Ok(created)
    }

    async fn find_assignment(&self, id: Id) -> Result<Option<Assignment>> {
        let tables = self.tables.read().await;
        Ok(tables.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_active_assignment(&self, section_id: Id, subject_id: Id) -> Result<Option<Assignment>> {
        let tables = self.tables.read().await;
        Ok(tables.active_assignment(section_id, subject_id).cloned())
    }

    async fn update_assignment(&self, id: Id, changes: AssignmentChanges) -> Result<Assignment> {
        let mut tables = self.tables.write().await;
        let current = tables
            .assignments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        if changes.is_active.unwrap_or(current.is_active) {
            if let Some(other) = tables
                .active_assignment(current.section_id, current.subject_id)
                .filter(|a| a.id != id)
            {
                return Err(AppError::conflict_with(
                    "A teacher is already assigned to this section-subject combination",
                    serde_json::json!({ "currentTeacherId": other.teacher_id }),
                ));
            }
        }

        let assignment = tables
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;
        if let Some(teacher_id) = changes.teacher_id {
            assignment.teacher_id = teacher_id;
        }
        if let Some(is_active) = changes.is_active {
            assignment.is_active = is_active;
        }
        assignment.updated_at = Utc::now();
        Ok(assignment.clone())
    }

    async fn delete_assignment(&self, id: Id, hard: bool) -> Result<()> {
        let mut tables = self.tables.write().await;
        if hard {
            tables.assignments.retain(|a| a.id != id);
        }
        else if let Some(assignment) = tables.assignments.iter_mut().find(|a| a.id == id) {
            assignment.is_active = false;
            assignment.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_assignments(&self, filter: AssignmentFilter) -> Result<Vec<Assignment>> {
        let tables = self.tables.read().await;
        let mut assignments: Vec<Assignment> = tables
            .assignments
            .iter()
            .filter(|a| a.is_active)
            .filter(|a| filter.teacher_id.is_none_or(|id| a.teacher_id == id))
            .filter(|a| filter.subject_id.is_none_or(|id| a.subject_id == id))
            .filter(|a| filter.section_id.is_none_or(|id| a.section_id == id))
            .filter(|a| {
                if filter.class_id.is_none() && filter.school_code.is_none() {
                    return true;
                }
                let Some(section) = tables.section(a.section_id)
                else {
                    return false;
                };
                filter.class_id.is_none_or(|id| section.class_id == id) &&
                    filter
                        .school_code
                        .as_deref()
                        .is_none_or(|code| section.school_code == code)
            })
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.id);
        Ok(assignments)
    }

    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> Result<Enrollment> {
        let mut tables = self.tables.write().await;
        if tables
            .enrollments
            .iter()
            .any(|e| e.student_id == enrollment.student_id && e.session_id == enrollment.session_id)
        {
            return Err(AppError::conflict("Student is already enrolled for this session"));
        }
        if let Some(roll) = enrollment.roll_number.as_deref() {
            let taken = tables.enrollments.iter().any(|e| {
                e.session_id == enrollment.session_id &&
                    e.section_id == enrollment.section_id &&
                    e.roll_number.as_deref() == Some(roll)
            });
            if taken {
                return Err(AppError::conflict(
                    "Roll number already taken in this section for this session",
                ));
            }
        }

        let now = Utc::now();
        let row = Enrollment {
            id:               tables.next_id(),
            student_id:       enrollment.student_id,
            session_id:       enrollment.session_id,
            class_id:         enrollment.class_id,
            section_id:       enrollment.section_id,
            roll_number:      enrollment.roll_number,
            admission_number: enrollment.admission_number,
            enrollment_date:  enrollment.enrollment_date,
            status:           enrollment.status,
            is_active:        true,
            created_at:       now,
            updated_at:       now,
        };
        tables.enrollments.push(row.clone());
        Ok(row)
    }

    async fn list_enrollments(&self, filter: EnrollmentFilter) -> Result<Vec<Enrollment>> {
        let tables = self.tables.read().await;
        let mut enrollments: Vec<Enrollment> = tables
            .enrollments
            .iter()
            .filter(|e| e.is_active)
            .filter(|e| {
                filter
                    .section_ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&e.section_id))
            })
            .filter(|e| filter.session_id.is_none_or(|id| e.session_id == id))
            .cloned()
            .collect();
        enrollments.sort_by(roll_order);
        Ok(enrollments)
    }
}

#[async_trait]
impl IdentityDirectory for MemoryStore {
    async fn find_user(&self, id: Id) -> Result<Option<UserSummary>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_users(&self, ids: &[Id]) -> Result<Vec<UserSummary>> {
        let tables = self.tables.read().await;
        Ok(by_ids(&tables.users, ids, |u| u.id))
    }

    async fn list_teaching_staff(&self, school_id: Id) -> Result<Vec<UserSummary>> {
        let tables = self.tables.read().await;
        let mut staff: Vec<UserSummary> = tables
            .users
            .iter()
            .filter(|u| u.is_active && u.role.can_teach() && u.school_id == Some(school_id))
            .cloned()
            .collect();
        staff.sort_by(|a, b| a.full_name.cmp(&b.full_name).then_with(|| a.id.cmp(&b.id)));
        Ok(staff)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::EnrollmentStatus;

    fn enrollment(student_id: Id, roll_number: Option<&str>) -> NewEnrollment {
        NewEnrollment {
            student_id,
            session_id: 1,
            class_id: 2,
            section_id: 3,
            roll_number: roll_number.map(str::to_string),
            admission_number: None,
            enrollment_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            status: EnrollmentStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_enrollment_roll_numbers_sort_as_strings_with_missing_last() {
        let store = MemoryStore::new();
        for (student, roll) in [(1, Some("2")), (2, None), (3, Some("10")), (4, Some("1"))] {
            store.insert_enrollment(enrollment(student, roll)).await.unwrap();
        }

        let rolls: Vec<Option<String>> = store
            .list_enrollments(EnrollmentFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.roll_number)
            .collect();
        assert_eq!(rolls, vec![
            Some("1".to_string()),
            Some("10".to_string()),
            Some("2".to_string()),
            None
        ]);
    }

    #[tokio::test]
    async fn test_enrollment_unique_constraints() {
        let store = MemoryStore::new();
        store.insert_enrollment(enrollment(1, Some("5"))).await.unwrap();

        let err = store.insert_enrollment(enrollment(1, Some("6"))).await.unwrap_err();
        assert_eq!(err.message(), "Student is already enrolled for this session");

        let err = store.insert_enrollment(enrollment(2, Some("5"))).await.unwrap_err();
        assert_eq!(err.message(), "Roll number already taken in this section for this session");

        // Missing roll numbers never collide.
        store.insert_enrollment(enrollment(3, None)).await.unwrap();
        store.insert_enrollment(enrollment(4, None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_assignments_is_all_or_nothing() {
        let store = MemoryStore::new();
        store
            .insert_assignments(vec![NewAssignment {
                section_id: 1,
                subject_id: 1,
                teacher_id: 10,
            }])
            .await
            .unwrap();

        let err = store
            .insert_assignments(vec![
                NewAssignment {
                    section_id: 1,
                    subject_id: 2,
                    teacher_id: 11,
                },
                NewAssignment {
                    section_id: 1,
                    subject_id: 1,
                    teacher_id: 12,
                },
            ])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.details().unwrap()["currentTeacherId"], 10);

        let all = store.list_assignments(AssignmentFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_reactivation_respects_active_pair() {
        let store = MemoryStore::new();
        let first = store
            .insert_assignments(vec![NewAssignment {
                section_id: 1,
                subject_id: 1,
                teacher_id: 10,
            }])
            .await
            .unwrap()
            .remove(0);
        store.delete_assignment(first.id, false).await.unwrap();
        store
            .insert_assignments(vec![NewAssignment {
                section_id: 1,
                subject_id: 1,
                teacher_id: 11,
            }])
            .await
            .unwrap();

        let err = store
            .update_assignment(first.id, AssignmentChanges {
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.details().unwrap()["currentTeacherId"], 11);
    }
}
