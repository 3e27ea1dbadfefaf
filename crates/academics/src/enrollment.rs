//! # Enrollment Engine
//!
//! Student -> Session/Class/Section membership. One enrollment per student
//! per session; roll numbers are unique within a section for a session.
//! Both rules are enforced by the store so that concurrent writers surface a
//! `Conflict` instead of a duplicate row.

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use error::{AppError, Result};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    commands::EnrollStudent,
    config::AcademicsConfig,
    identity::{IdentityDirectory, UserSummary},
    loader,
    model::{Class, Id, School, Section, Session},
    store::{AcademicStore, EnrollmentFilter, NewEnrollment},
    views::{ClassRef, EnrollmentDetail, SectionRef, SectionStudent, SessionRef, SessionWindow, UserContact},
};

#[derive(Clone)]
pub struct EnrollmentEngine {
    store:     Arc<dyn AcademicStore>,
    directory: Arc<dyn IdentityDirectory>,
    config:    AcademicsConfig,
}

impl EnrollmentEngine {
    pub fn new(store: Arc<dyn AcademicStore>, directory: Arc<dyn IdentityDirectory>, config: AcademicsConfig) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    /// Enroll a student into a session, class and section of a school.
    ///
    /// The referenced entities are looked up concurrently and must exist.
    /// Whether they also belong to `school_code` is only enforced when strict
    /// tenancy is configured; otherwise a mismatch is logged and accepted.
    pub async fn enroll(&self, school_code: &str, cmd: EnrollStudent) -> Result<EnrollmentDetail> {
        cmd.validate()?;

        let (school, session, class, section, student) = tokio::try_join!(
            self.store.find_school_by_code(school_code),
            self.store.find_session(cmd.session_id),
            self.store.find_class(cmd.class_id),
            self.store.find_section(cmd.section_id),
            self.directory.find_user(cmd.student_id)
        )?;

        let school = school.ok_or_else(|| AppError::not_found("School not found"))?;
        let (Some(session), Some(class), Some(section), Some(student)) = (session, class, section, student)
        else {
            return Err(AppError::not_found("One or more entities not found"));
        };

        let foreign = tenancy_mismatches(&school, &session, &class, &section, &student);
        if !foreign.is_empty() {
            if self.config.strict_enrollment_tenancy {
                return Err(AppError::invalid_state(format!(
                    "Enrollment references entities outside school {}: {}",
                    school.code,
                    foreign.join(", ")
                )));
            }
            warn!(
                school_code = %school.code,
                student_id = student.id,
                mismatched = %foreign.join(","),
                "Enrollment crosses school boundaries"
            );
        }

        let enrollment = self
            .store
            .insert_enrollment(NewEnrollment {
                student_id:       student.id,
                session_id:       session.id,
                class_id:         class.id,
                section_id:       section.id,
                roll_number:      cmd.roll_number,
                admission_number: cmd.admission_number,
                enrollment_date:  cmd.enrollment_date.unwrap_or_else(|| Utc::now().date_naive()),
                status:           cmd.status.unwrap_or_default(),
            })
            .await?;

        info!(
            school_code = %school.code,
            enrollment_id = enrollment.id,
            student_id = enrollment.student_id,
            session_id = enrollment.session_id,
            section_id = enrollment.section_id,
            "Student enrolled"
        );

        Ok(EnrollmentDetail {
            enrollment,
            student: UserContact::from(&student),
            session: SessionWindow::from(&session),
            class: ClassRef::from(&class),
            section: SectionRef::from(&section),
        })
    }

    /// Active enrollments of a section ordered by roll number, as strings,
    /// with unnumbered students last.
    pub async fn students_by_section(&self, section_id: Id, session_id: Option<Id>) -> Result<Vec<SectionStudent>> {
        let enrollments = self
            .store
            .list_enrollments(EnrollmentFilter {
                section_ids: Some(vec![section_id]),
                session_id,
            })
            .await?;

        let students = loader::users(self.directory.as_ref(), enrollments.iter().map(|e| e.student_id)).await?;
        let mut sessions: HashMap<Id, Option<Session>> = HashMap::new();
        for enrollment in &enrollments {
            if !sessions.contains_key(&enrollment.session_id) {
                let session = self.store.find_session(enrollment.session_id).await?;
                sessions.insert(enrollment.session_id, session);
            }
        }

        Ok(enrollments
            .into_iter()
            .map(|enrollment| {
                SectionStudent {
                    student: students.get(&enrollment.student_id).map(UserContact::from),
                    session: sessions
                        .get(&enrollment.session_id)
                        .and_then(Option::as_ref)
                        .map(SessionRef::from),
                    enrollment,
                }
            })
            .collect())
    }
}

/// Names of the referenced entities that sit outside `school`.
fn tenancy_mismatches(
    school: &School,
    session: &Session,
    class: &Class,
    section: &Section,
    student: &UserSummary,
) -> Vec<&'static str> {
    let mut foreign = Vec::new();
    if session.school_code != school.code {
        foreign.push("session");
    }
    if class.school_code != school.code {
        foreign.push("class");
    }
    if section.school_code != school.code || section.class_id != class.id {
        foreign.push("section");
    }
    if student.school_id.is_some_and(|id| id != school.id) {
        foreign.push("student");
    }
    foreign
}
