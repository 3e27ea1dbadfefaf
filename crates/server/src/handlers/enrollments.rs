//! # Enrollment Handlers

use academics::{
    commands::EnrollStudent,
    model::Id,
    views::{EnrollmentDetail, SectionStudent},
};
use auth::Principal;
use error::Result;
use roles_macro::require_role;
use tracing::info;

use super::{created, ok, Created, Reply};
use crate::AppState;

/// Enroll a student into a session, class and section
#[require_role(gate = admin)]
pub async fn enroll_student_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    req: EnrollStudent,
) -> Result<Created<EnrollmentDetail>> {
    let enrollment = state.academics.enrollments.enroll(school_code, req).await?;
    info!(enrollment_id = enrollment.enrollment.id, user_id = principal.id, "Student enrolled via API");
    Ok(created(enrollment, "Student enrolled successfully"))
}

/// Active enrollments of a section ordered by roll number
#[require_role(gate = staff)]
pub async fn students_by_section_handler(
    state: &AppState,
    principal: Principal,
    section_id: Id,
    session_id: Option<Id>,
) -> Result<Reply<Vec<SectionStudent>>> {
    Ok(ok(state
        .academics
        .enrollments
        .students_by_section(section_id, session_id)
        .await?))
}
