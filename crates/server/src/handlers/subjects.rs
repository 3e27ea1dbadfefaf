//! # Subject Handlers
//!
//! Subject lifecycle and the class catalog.

use academics::{
    commands::{AssignSubjects, CreateSubject, UpdateSubject},
    model::{Id, Subject},
    views::{ClassSubjectsView, ClassWithSubjects, SubjectList},
};
use auth::Principal;
use error::Result;
use roles_macro::require_role;
use tracing::info;

use super::{acknowledged, created, ok, ok_with, Created, Reply};
use crate::AppState;

#[require_role(gate = admin)]
pub async fn create_subject_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    req: CreateSubject,
) -> Result<Created<Subject>> {
    let subject = state.academics.structure.create_subject(school_code, req).await?;
    info!(subject_id = subject.id, user_id = principal.id, "Subject created via API");
    Ok(created(subject, "Subject created successfully"))
}

/// Subjects of a school by name, each with the classes offering it
#[require_role(gate = staff)]
pub async fn subjects_by_school_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    include_inactive: bool,
) -> Result<Reply<SubjectList>> {
    Ok(ok(state
        .academics
        .structure
        .subjects_by_school(school_code, include_inactive)
        .await?))
}

#[require_role(gate = admin)]
pub async fn update_subject_handler(
    state: &AppState,
    principal: Principal,
    subject_id: Id,
    req: UpdateSubject,
) -> Result<Reply<Subject>> {
    let subject = state.academics.structure.update_subject(subject_id, req).await?;
    Ok(ok_with(subject, "Subject updated successfully"))
}

/// Soft delete by default; `hard_delete` removes the row
///
/// Blocked with a conflict while the subject is in a class catalog or has
/// active teachers.
#[require_role(gate = admin)]
pub async fn delete_subject_handler(
    state: &AppState,
    principal: Principal,
    subject_id: Id,
    hard_delete: bool,
) -> Result<Reply<()>> {
    state
        .academics
        .structure
        .delete_subject(subject_id, hard_delete)
        .await?;
    info!(subject_id, hard_delete, user_id = principal.id, "Subject deleted via API");
    Ok(acknowledged(if hard_delete {
        "Subject deleted permanently"
    }
    else {
        "Subject deactivated successfully"
    }))
}

/// Add one or more subjects to a class catalog
#[require_role(gate = admin)]
pub async fn assign_subjects_handler(
    state: &AppState,
    principal: Principal,
    req: AssignSubjects,
) -> Result<Reply<ClassWithSubjects>> {
    let class = state.academics.structure.assign_subjects(req).await?;
    Ok(ok_with(class, "Subjects assigned to class successfully"))
}

#[require_role(gate = admin)]
pub async fn remove_subject_from_class_handler(
    state: &AppState,
    principal: Principal,
    class_id: Id,
    subject_id: Id,
) -> Result<Reply<()>> {
    state
        .academics
        .structure
        .remove_subject_from_class(class_id, subject_id)
        .await?;
    Ok(acknowledged("Subject removed from class successfully"))
}

/// Catalog of a class plus the teachers of each of its sections
#[require_role(gate = staff)]
pub async fn class_subjects_handler(
    state: &AppState,
    principal: Principal,
    class_id: Id,
) -> Result<Reply<ClassSubjectsView>> {
    Ok(ok(state.academics.structure.class_subjects(class_id).await?))
}
