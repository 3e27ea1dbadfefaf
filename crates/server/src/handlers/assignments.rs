//! # Assignment Handlers
//!
//! Teacher assignments and the staffing views built on them.

use academics::{
    commands::{AssignTeacher, BulkAssignTeachers, UpdateAssignment},
    model::Id,
    views::{
        AssignmentDetail,
        BulkAssignmentResult,
        SectionTeachers,
        SubjectTeachers,
        TeacherProfile,
        TeacherSchedule,
        TeachingAnalytics,
        UnassignedCombinations,
    },
};
use auth::Principal;
use error::Result;
use roles_macro::require_role;
use tracing::info;

use super::{acknowledged, created, ok, ok_with, Created, Reply};
use crate::{
    dto::queries::{AvailableTeachersQuery, ScopeQuery},
    AppState,
};

/// Assign a teacher to a section-subject pair
///
/// Fails with a conflict carrying `currentTeacherId` when the pair already
/// has an active teacher.
#[require_role(gate = admin)]
pub async fn assign_teacher_handler(
    state: &AppState,
    principal: Principal,
    req: AssignTeacher,
) -> Result<Created<AssignmentDetail>> {
    let assignment = state.academics.assignments.assign_teacher(req).await?;
    info!(assignment_id = assignment.assignment.id, user_id = principal.id, "Teacher assigned via API");
    Ok(created(assignment, "Teacher assigned to section-subject successfully"))
}

#[require_role(gate = admin)]
pub async fn update_assignment_handler(
    state: &AppState,
    principal: Principal,
    assignment_id: Id,
    req: UpdateAssignment,
) -> Result<Reply<AssignmentDetail>> {
    let assignment = state
        .academics
        .assignments
        .update_assignment(assignment_id, req)
        .await?;
    Ok(ok_with(assignment, "Teacher assignment updated successfully"))
}

#[require_role(gate = admin)]
pub async fn remove_assignment_handler(
    state: &AppState,
    principal: Principal,
    assignment_id: Id,
    hard_delete: bool,
) -> Result<Reply<()>> {
    state
        .academics
        .assignments
        .remove_assignment(assignment_id, hard_delete)
        .await?;
    Ok(acknowledged(if hard_delete {
        "Assignment deleted permanently"
    }
    else {
        "Assignment deactivated successfully"
    }))
}

/// Create many assignments at once, all or none
#[require_role(gate = admin)]
pub async fn bulk_assign_handler(
    state: &AppState,
    principal: Principal,
    req: BulkAssignTeachers,
) -> Result<Created<BulkAssignmentResult>> {
    let result = state.academics.assignments.bulk_assign(req).await?;
    info!(created = result.created, user_id = principal.id, "Bulk assignment via API");
    Ok(created(result, "Teachers assigned successfully"))
}

#[require_role(gate = staff)]
pub async fn teacher_schedule_handler(
    state: &AppState,
    principal: Principal,
    teacher_id: Id,
    scope: ScopeQuery,
) -> Result<Reply<TeacherSchedule>> {
    Ok(ok(state
        .academics
        .assignments
        .teacher_schedule(teacher_id, scope.school_code, scope.session_id)
        .await?))
}

#[require_role(gate = staff)]
pub async fn teachers_by_subject_handler(
    state: &AppState,
    principal: Principal,
    subject_id: Id,
    scope: ScopeQuery,
) -> Result<Reply<SubjectTeachers>> {
    Ok(ok(state
        .academics
        .assignments
        .teachers_by_subject(subject_id, scope.school_code, scope.session_id)
        .await?))
}

#[require_role(gate = staff)]
pub async fn section_teachers_handler(
    state: &AppState,
    principal: Principal,
    section_id: Id,
) -> Result<Reply<SectionTeachers>> {
    Ok(ok(state.academics.assignments.section_teachers(section_id).await?))
}

/// Staffing overview for the active session, or `session_id` when given
#[require_role(gate = staff)]
pub async fn teaching_analytics_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    session_id: Option<Id>,
) -> Result<Reply<TeachingAnalytics>> {
    Ok(ok(state
        .academics
        .assignments
        .teaching_analytics(school_code, session_id)
        .await?))
}

#[require_role(gate = staff)]
pub async fn available_teachers_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    query: AvailableTeachersQuery,
) -> Result<Reply<Vec<TeacherProfile>>> {
    Ok(ok(state
        .academics
        .assignments
        .available_teachers(school_code, query.subject_id, query.exclude_assigned)
        .await?))
}

#[require_role(gate = staff)]
pub async fn unassigned_combinations_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
) -> Result<Reply<UnassignedCombinations>> {
    Ok(ok(state
        .academics
        .assignments
        .unassigned_combinations(school_code)
        .await?))
}
