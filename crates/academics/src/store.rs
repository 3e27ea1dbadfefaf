//! # Store Interface
//!
//! The persistence seam of the engines. Implementations own transactions and
//! unique constraints; the engines own every business rule.
//!
//! Two operations need multi-statement atomicity and are therefore single
//! trait methods: [`AcademicStore::insert_session`] (deactivate siblings,
//! then insert) and [`AcademicStore::insert_assignments`] (re-check, then
//! create the whole batch). Implementations must also reject, as `Conflict`,
//! any write that would break a uniqueness invariant, whatever the engine
//! checked beforehand.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::NaiveDate;
use error::Result;

use crate::model::{
    Assignment,
    Class,
    ClassSubject,
    Enrollment,
    EnrollmentStatus,
    Id,
    School,
    Section,
    Session,
    Subject,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSchool {
    pub code:             String,
    pub name:             String,
    pub address:          Option<String>,
    pub phone:            Option<String>,
    pub email:            Option<String>,
    pub base_url:         Option<String>,
    pub logo_path:        Option<String>,
    pub banner_path:      Option<String>,
    pub payment_link:     Option<String>,
    pub principal_name:   Option<String>,
    pub established_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub school_code: String,
    pub name:        String,
    pub start_date:  NaiveDate,
    pub end_date:    NaiveDate,
    pub is_active:   bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub school_code: String,
    pub name:        String,
    pub level:       i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSection {
    pub school_code:      String,
    pub class_id:         Id,
    pub name:             String,
    pub capacity:         i32,
    pub class_teacher_id: Option<Id>,
    pub room:             Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub school_code: String,
    pub name:        String,
    pub code:        Option<String>,
    pub description: Option<String>,
    pub is_active:   bool,
}

/// Partial update of a subject; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectChanges {
    pub name:        Option<String>,
    pub code:        Option<String>,
    pub description: Option<String>,
    pub is_active:   Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewAssignment {
    pub section_id: Id,
    pub subject_id: Id,
    pub teacher_id: Id,
}

/// Partial update of an assignment; `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentChanges {
    pub teacher_id: Option<Id>,
    pub is_active:  Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id:       Id,
    pub session_id:       Id,
    pub class_id:         Id,
    pub section_id:       Id,
    pub roll_number:      Option<String>,
    pub admission_number: Option<String>,
    pub enrollment_date:  NaiveDate,
    pub status:           EnrollmentStatus,
}

/// Filter over **active** assignments. Every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    pub teacher_id:  Option<Id>,
    pub subject_id:  Option<Id>,
    pub section_id:  Option<Id>,
    /// Matches assignments whose section belongs to this class, whether or
    /// not the section itself is still active.
    pub class_id:    Option<Id>,
    /// Matches assignments whose section belongs to this school.
    pub school_code: Option<String>,
}

/// Filter over **active** enrollments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentFilter {
    pub section_ids: Option<Vec<Id>>,
    pub session_id:  Option<Id>,
}

/// Persistent store of the academic graph.
///
/// Listing methods document their ordering; lookups by id return inactive
/// rows too and leave the status check to the caller.
#[async_trait]
pub trait AcademicStore: Send + Sync {
    // Schools

    /// Fails with `Conflict` when the code is taken.
    async fn insert_school(&self, school: NewSchool) -> Result<School>;
    async fn find_school_by_code(&self, code: &str) -> Result<Option<School>>;

    // Sessions

    /// Inserts a session. When `is_active` is set, every other active
    /// session of the school is deactivated in the same transaction.
    async fn insert_session(&self, session: NewSession) -> Result<Session>;
    async fn find_session(&self, id: Id) -> Result<Option<Session>>;
    async fn find_active_session(&self, school_code: &str) -> Result<Option<Session>>;
    /// All sessions of a school, newest first.
    async fn list_sessions(&self, school_code: &str) -> Result<Vec<Session>>;

    // Classes

    async fn insert_class(&self, class: NewClass) -> Result<Class>;
    async fn find_class(&self, id: Id) -> Result<Option<Class>>;
    async fn find_classes(&self, ids: &[Id]) -> Result<Vec<Class>>;
    /// Active classes of a school by level, then name.
    async fn list_classes(&self, school_code: &str) -> Result<Vec<Class>>;
    async fn find_active_class_by_name(&self, school_code: &str, name: &str) -> Result<Option<Class>>;

    // Sections

    async fn insert_section(&self, section: NewSection) -> Result<Section>;
    async fn find_section(&self, id: Id) -> Result<Option<Section>>;
    async fn find_sections(&self, ids: &[Id]) -> Result<Vec<Section>>;
    /// Active sections of the given classes by name.
    async fn list_sections(&self, class_ids: &[Id]) -> Result<Vec<Section>>;
    /// Active sections of a school by name.
    async fn list_school_sections(&self, school_code: &str) -> Result<Vec<Section>>;
    async fn find_active_section_by_name(&self, class_id: Id, name: &str) -> Result<Option<Section>>;

    // Subjects

    async fn insert_subject(&self, subject: NewSubject) -> Result<Subject>;
    async fn find_subject(&self, id: Id) -> Result<Option<Subject>>;
    async fn find_subjects(&self, ids: &[Id]) -> Result<Vec<Subject>>;
    /// Active subject of a school with this code, ignoring `exclude`.
    async fn find_active_subject_by_code(
        &self,
        school_code: &str,
        code: &str,
        exclude: Option<Id>,
    ) -> Result<Option<Subject>>;
    /// Subjects of a school by name.
    async fn list_subjects(&self, school_code: &str, include_inactive: bool) -> Result<Vec<Subject>>;
    async fn update_subject(&self, id: Id, changes: SubjectChanges) -> Result<Subject>;
    /// Soft delete flips `is_active`; hard delete removes the row and its
    /// catalog links.
    async fn delete_subject(&self, id: Id, hard: bool) -> Result<()>;

    // Class catalog

    /// Adds the links that do not exist yet.
    async fn add_class_subjects(&self, class_id: Id, subject_ids: &[Id]) -> Result<()>;
    /// Returns whether a link was removed.
    async fn remove_class_subject(&self, class_id: Id, subject_id: Id) -> Result<bool>;
    async fn list_class_subjects(&self, class_ids: &[Id]) -> Result<Vec<ClassSubject>>;
    async fn list_subject_classes(&self, subject_id: Id) -> Result<Vec<ClassSubject>>;

    // Assignments

    /// Creates every assignment or none. Fails with `Conflict` if any
    /// (section, subject) pair already has an active assignment or appears
    /// twice in the batch.
    async fn insert_assignments(&self, batch: Vec<NewAssignment>) -> Result<Vec<Assignment>>;
    async fn find_assignment(&self, id: Id) -> Result<Option<Assignment>>;
    async fn find_active_assignment(&self, section_id: Id, subject_id: Id) -> Result<Option<Assignment>>;
    async fn update_assignment(&self, id: Id, changes: AssignmentChanges) -> Result<Assignment>;
    async fn delete_assignment(&self, id: Id, hard: bool) -> Result<()>;
    /// Active assignments matching the filter, by id.
    async fn list_assignments(&self, filter: AssignmentFilter) -> Result<Vec<Assignment>>;

    // Enrollments

    /// Fails with `Conflict` on a second enrollment of the student in the
    /// session or on a roll number already taken in the section for the
    /// session.
    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> Result<Enrollment>;
    /// Active enrollments by roll number (string order, missing last), then id.
    async fn list_enrollments(&self, filter: EnrollmentFilter) -> Result<Vec<Enrollment>>;
}

/// Listing order of enrollments: roll number as a string with missing roll
/// numbers last, then id.
pub fn roll_order(a: &Enrollment, b: &Enrollment) -> Ordering {
    let by_roll = match (&a.roll_number, &b.roll_number) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_roll.then_with(|| a.id.cmp(&b.id))
}
