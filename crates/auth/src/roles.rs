//! # Role Gates
//!
//! Every user carries exactly one role, so a gate is simply the set of roles
//! it lets through.

use academics::{Id, Role};
use error::AppError;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Roles allowed to change the academic structure.
pub const ADMIN: &[Role] = &[Role::SuperAdmin, Role::Admin];

/// Roles allowed to read the academic structure.
pub const STAFF_READER: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Principal, Role::Teacher];

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id:        Id,
    pub role:      Role,
    pub school_id: Option<Id>,
}

impl Principal {
    pub fn has_any(&self, roles: &[Role]) -> bool { roles.contains(&self.role) }
}

/// Fail with `Forbidden` unless the principal holds one of `roles`.
pub fn ensure_role(principal: &Principal, roles: &[Role]) -> Result<()> {
    if principal.has_any(roles) {
        return Ok(());
    }
    tracing::debug!(
        user_id = principal.id,
        role = %principal.role,
        "Role gate denied request"
    );
    Err(AppError::forbidden("Access denied"))
}
