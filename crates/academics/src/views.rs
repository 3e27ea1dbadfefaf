//! # Read Models
//!
//! Views returned by the engines. Each one is assembled from discrete store
//! calls and carries only the attributes its consumers need; user records in
//! particular are reduced to their public contact fields.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    identity::{Role, UserSummary},
    model::{Assignment, Class, Enrollment, Id, School, Section, Session, Subject},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    pub id:    Id,
    pub name:  String,
    pub level: i32,
}

impl From<&Class> for ClassRef {
    fn from(class: &Class) -> Self {
        Self {
            id:    class.id,
            name:  class.name.clone(),
            level: class.level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    pub id:   Id,
    pub name: String,
    pub code: Option<String>,
}

impl From<&Subject> for SubjectRef {
    fn from(subject: &Subject) -> Self {
        Self {
            id:   subject.id,
            name: subject.name.clone(),
            code: subject.code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id:        Id,
    pub full_name: String,
    pub email:     String,
}

impl From<&UserSummary> for UserRef {
    fn from(user: &UserSummary) -> Self {
        Self {
            id:        user.id,
            full_name: user.full_name.clone(),
            email:     user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContact {
    pub id:            Id,
    pub full_name:     String,
    pub email:         String,
    pub mobile_number: Option<String>,
}

impl From<&UserSummary> for UserContact {
    fn from(user: &UserSummary) -> Self {
        Self {
            id:            user.id,
            full_name:     user.full_name.clone(),
            email:         user.email.clone(),
            mobile_number: user.mobile_number.clone(),
        }
    }
}

/// Teaching staff as listed for assignment pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id:            Id,
    pub full_name:     String,
    pub email:         String,
    pub mobile_number: Option<String>,
    pub qualification: Option<String>,
}

impl From<&UserSummary> for TeacherProfile {
    fn from(user: &UserSummary) -> Self {
        Self {
            id:            user.id,
            full_name:     user.full_name.clone(),
            email:         user.email.clone(),
            mobile_number: user.mobile_number.clone(),
            qualification: user.qualification.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRef {
    pub id:   Id,
    pub name: String,
}

impl From<&Session> for SessionRef {
    fn from(session: &Session) -> Self {
        Self {
            id:   session.id,
            name: session.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionWindow {
    pub id:         Id,
    pub name:       String,
    pub start_date: NaiveDate,
    pub end_date:   NaiveDate,
}

impl From<&Session> for SessionWindow {
    fn from(session: &Session) -> Self {
        Self {
            id:         session.id,
            name:       session.name.clone(),
            start_date: session.start_date,
            end_date:   session.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRef {
    pub id:   Id,
    pub name: String,
    pub room: Option<String>,
}

impl From<&Section> for SectionRef {
    fn from(section: &Section) -> Self {
        Self {
            id:   section.id,
            name: section.name.clone(),
            room: section.room.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithClass {
    pub id:    Id,
    pub name:  String,
    pub room:  Option<String>,
    pub class: ClassRef,
}

impl SectionWithClass {
    pub fn new(section: &Section, class: &Class) -> Self {
        Self {
            id:    section.id,
            name:  section.name.clone(),
            room:  section.room.clone(),
            class: class.into(),
        }
    }
}

// Structure

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDetail {
    #[serde(flatten)]
    pub school:   School,
    /// Newest first.
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolStructure {
    pub school:         School,
    pub active_session: Option<Session>,
    pub classes:        Vec<ClassTree>,
}

/// An active class with its active sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTree {
    #[serde(flatten)]
    pub class:    Class,
    pub sections: Vec<SectionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    #[serde(flatten)]
    pub section:       Section,
    pub class_teacher: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDetail {
    #[serde(flatten)]
    pub section:       Section,
    pub class:         ClassRef,
    pub class_teacher: Option<UserContact>,
}

// Subject catalog

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWithClasses {
    #[serde(flatten)]
    pub subject: Subject,
    /// Active classes carrying the subject.
    pub classes: Vec<ClassRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectList {
    pub subjects: Vec<SubjectWithClasses>,
    pub count:    usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassWithSubjects {
    #[serde(flatten)]
    pub class:    Class,
    pub subjects: Vec<Subject>,
}

/// An active assignment as seen from its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTeacher {
    pub assignment_id: Id,
    pub subject:       SubjectRef,
    pub teacher:       Option<UserContact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithTeachers {
    #[serde(flatten)]
    pub section:          Section,
    pub subject_teachers: Vec<SubjectTeacher>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSubjectsView {
    #[serde(flatten)]
    pub class:    Class,
    pub subjects: Vec<Subject>,
    pub sections: Vec<SectionWithTeachers>,
}

// Assignments

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub section:    SectionWithClass,
    pub subject:    SubjectRef,
    pub teacher:    Option<UserContact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTeachers {
    #[serde(flatten)]
    pub section:          Section,
    pub class:            ClassRef,
    pub class_teacher:    Option<UserContact>,
    pub subject_teachers: Vec<SubjectTeacher>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignmentResult {
    pub created:     usize,
    pub assignments: Vec<AssignmentDetail>,
}

// Schedules

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTeacher {
    pub id:        Id,
    pub full_name: String,
    pub email:     String,
    pub role:      Role,
}

/// Aggregates over the active assignments of a teacher.
///
/// `total_students` is a teaching-load figure: each assignment contributes
/// the active enrollment count of its section, so a section taught in two
/// subjects is counted twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadStats {
    pub total_assignments: usize,
    pub total_classes:     usize,
    pub total_sections:    usize,
    pub total_subjects:    usize,
    pub total_students:    usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSection {
    pub id:            Id,
    pub name:          String,
    pub room:          Option<String>,
    pub capacity:      i32,
    pub student_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSubject {
    pub id:            Id,
    pub name:          String,
    pub code:          Option<String>,
    pub assignment_id: Id,
}

/// One class-section slot of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// `"<class name>-<section name>"`.
    pub key:      String,
    pub class:    ClassRef,
    pub section:  ScheduleSection,
    pub subjects: Vec<ScheduledSubject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSchedule {
    pub teacher:        ScheduleTeacher,
    pub workload_stats: WorkloadStats,
    pub schedule:       Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaughtSection {
    pub assignment_id: Id,
    pub id:            Id,
    pub name:          String,
    pub room:          Option<String>,
    pub class:         ClassRef,
    pub student_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherLoad {
    pub teacher:        TeacherProfile,
    pub sections:       Vec<TaughtSection>,
    pub total_students: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTeachers {
    pub subject:  SubjectRef,
    pub teachers: Vec<TeacherLoad>,
}

// Analytics

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_teachers:    usize,
    pub total_subjects:    usize,
    pub total_classes:     usize,
    pub total_sections:    usize,
    pub total_assignments: usize,
    pub unassigned_count:  usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadDistribution {
    pub light:      usize,
    pub moderate:   usize,
    pub heavy:      usize,
    pub overloaded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWorkloadDetail {
    pub teacher:          Option<UserRef>,
    pub teacher_id:       Id,
    pub assignment_count: usize,
    pub total_students:   usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWorkload {
    pub distribution: WorkloadDistribution,
    pub details:      Vec<TeacherWorkloadDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCoverageDetail {
    pub id:                Id,
    pub name:              String,
    pub code:              Option<String>,
    pub total_assignments: usize,
    /// Distinct class names the subject is taught in.
    pub classes_offered:   Vec<String>,
    pub is_fully_covered:  bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCoverage {
    pub total:               usize,
    pub covered:             usize,
    pub uncovered:           usize,
    pub uncovered_subjects:  Vec<SubjectCoverageDetail>,
    pub details:             Vec<SubjectCoverageDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedSection {
    pub section_id:          Id,
    pub section_name:        String,
    pub class_name:          String,
    pub total_subjects:      usize,
    pub assigned_subjects:   usize,
    pub unassigned_subjects: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachingAnalytics {
    pub school:              SchoolRef,
    pub session:             SessionRef,
    pub overview:            AnalyticsOverview,
    pub teacher_workload:    TeacherWorkload,
    pub subject_coverage:    SubjectCoverage,
    pub unassigned_sections: Vec<UnassignedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedGroup {
    pub section:             SectionWithClass,
    pub unassigned_subjects: Vec<SubjectRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedCombinations {
    pub total_unassigned: usize,
    pub sections:         Vec<UnassignedGroup>,
}

// Enrollment

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student:    UserContact,
    pub session:    SessionWindow,
    pub class:      ClassRef,
    pub section:    SectionRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStudent {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student:    Option<UserContact>,
    pub session:    Option<SessionRef>,
}
