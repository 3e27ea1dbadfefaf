//! # Structure Handlers
//!
//! Sessions, classes and sections of a school.

use academics::{
    commands::{CreateClass, CreateSection, CreateSession},
    model::{Class, Id, Section, Session},
    views::{ClassTree, SectionDetail},
};
use auth::Principal;
use error::Result;
use roles_macro::require_role;
use tracing::info;

use super::{created, ok, Created, Reply};
use crate::AppState;

/// Create a session; an active one deactivates the school's other sessions
#[require_role(gate = admin)]
pub async fn create_session_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    req: CreateSession,
) -> Result<Created<Session>> {
    let session = state.academics.structure.create_session(school_code, req).await?;
    info!(session_id = session.id, user_id = principal.id, "Session created via API");
    Ok(created(session, "Session created successfully"))
}

#[require_role(gate = staff)]
pub async fn sessions_by_school_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
) -> Result<Reply<Vec<Session>>> {
    Ok(ok(state.academics.structure.sessions_by_school(school_code).await?))
}

#[require_role(gate = admin)]
pub async fn create_class_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    req: CreateClass,
) -> Result<Created<Class>> {
    let class = state.academics.structure.create_class(school_code, req).await?;
    info!(class_id = class.id, user_id = principal.id, "Class created via API");
    Ok(created(class, "Class created successfully"))
}

/// Active classes by level with their active sections
#[require_role(gate = staff)]
pub async fn classes_by_school_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
) -> Result<Reply<Vec<ClassTree>>> {
    Ok(ok(state.academics.structure.classes_by_school(school_code).await?))
}

/// Create a section under a class of the school
///
/// An optional class teacher must be an active teacher or principal.
#[require_role(gate = admin)]
pub async fn create_section_handler(
    state: &AppState,
    principal: Principal,
    school_code: &str,
    class_id: Id,
    req: CreateSection,
) -> Result<Created<Section>> {
    let section = state
        .academics
        .structure
        .create_section(school_code, class_id, req)
        .await?;
    info!(section_id = section.id, user_id = principal.id, "Section created via API");
    Ok(created(section, "Section created successfully"))
}

#[require_role(gate = staff)]
pub async fn sections_by_class_handler(
    state: &AppState,
    principal: Principal,
    class_id: Id,
) -> Result<Reply<Vec<SectionDetail>>> {
    Ok(ok(state.academics.structure.sections_by_class(class_id).await?))
}
