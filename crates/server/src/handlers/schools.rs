//! # School Handlers
//!
//! Tenant creation and the two public school views.

use academics::{
    commands::CreateSchool,
    model::School,
    views::{SchoolDetail, SchoolStructure},
};
use auth::Principal;
use error::Result;
use roles_macro::require_role;
use tracing::info;

use super::{created, ok, Created, Reply};
use crate::AppState;

/// Create a new school
#[require_role(gate = admin)]
pub async fn create_school_handler(
    state: &AppState,
    principal: Principal,
    req: CreateSchool,
) -> Result<Created<School>> {
    let school = state.academics.structure.create_school(req).await?;
    info!(school_code = %school.code, user_id = principal.id, "School created via API");
    Ok(created(school, "School created successfully"))
}

/// School with its sessions, newest first. Public.
pub async fn get_school_handler(state: &AppState, code: &str) -> Result<Reply<SchoolDetail>> {
    Ok(ok(state.academics.structure.school_by_code(code).await?))
}

/// School, active session and class tree. Public.
pub async fn get_school_structure_handler(state: &AppState, code: &str) -> Result<Reply<SchoolStructure>> {
    Ok(ok(state.academics.structure.school_structure(code).await?))
}
