//! # Identity Directory
//!
//! Read-only view over the users the engines validate against. Users are
//! owned by the identity system; the engines reference them and never write
//! them.

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use error::{AppError, Result};
use serde::{Deserialize, Serialize};

use crate::model::Id;

/// Role carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    SuperAdmin,
    Admin,
    Principal,
    Teacher,
    Staff,
    Student,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Principal,
        Role::Teacher,
        Role::Staff,
        Role::Student,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Principal => "principal",
            Role::Teacher => "teacher",
            Role::Staff => "staff",
            Role::Student => "student",
        }
    }

    /// Roles allowed to hold a teaching assignment or a class-teacher slot.
    pub const fn can_teach(self) -> bool { matches!(self, Role::Teacher | Role::Principal) }

    /// Roles allowed to change the academic structure.
    pub const fn is_admin(self) -> bool { matches!(self, Role::SuperAdmin | Role::Admin) }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::validation(format!("Unknown role: {}", s)))
    }
}

/// The slice of a user the engines need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id:            Id,
    pub full_name:     String,
    pub email:         String,
    pub mobile_number: Option<String>,
    pub qualification: Option<String>,
    pub role:          Role,
    pub is_active:     bool,
    pub school_id:     Option<Id>,
}

/// Lookup interface over the identity system.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn find_user(&self, id: Id) -> Result<Option<UserSummary>>;

    /// Users for the given ids, in no particular order. Unknown ids are skipped.
    async fn find_users(&self, ids: &[Id]) -> Result<Vec<UserSummary>>;

    /// Active teachers and principals of a school, ordered by full name.
    async fn list_teaching_staff(&self, school_id: Id) -> Result<Vec<UserSummary>>;
}

/// Resolve a user who may be given teaching duties.
///
/// Missing or deactivated users are `NotFound`; active users without a
/// teaching role are `Forbidden`.
pub async fn require_teacher(directory: &dyn IdentityDirectory, id: Id) -> Result<UserSummary> {
    ensure_can_teach(
        directory.find_user(id).await?,
        "Teacher not found or not authorized to teach",
    )
}

/// Check an already loaded user against the teaching rules of
/// [`require_teacher`], reporting `not_found` when the user is missing or
/// deactivated.
pub fn ensure_can_teach(user: Option<UserSummary>, not_found: &str) -> Result<UserSummary> {
    let user = user
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::not_found(not_found))?;

    if !user.role.can_teach() {
        return Err(AppError::forbidden(format!(
            "User {} with role '{}' is not authorized to teach",
            user.id, user.role
        )));
    }
    Ok(user)
}
