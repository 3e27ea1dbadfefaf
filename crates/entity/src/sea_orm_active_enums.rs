//! String-backed enumerations shared by the entities.
//!
//! Both enums are stored as plain strings so the same schema runs on
//! PostgreSQL and SQLite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of an identity-system user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "superadmin")]
    SuperAdmin,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "principal")]
    Principal,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "staff")]
    Staff,
    #[sea_orm(string_value = "student")]
    Student,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::SuperAdmin => write!(f, "superadmin"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Principal => write!(f, "principal"),
            UserRole::Teacher => write!(f, "teacher"),
            UserRole::Staff => write!(f, "staff"),
            UserRole::Student => write!(f, "student"),
        }
    }
}

/// Lifecycle state of a student enrollment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "transferred")]
    Transferred,
    #[sea_orm(string_value = "passed")]
    Passed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "dropout")]
    Dropout,
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "active"),
            EnrollmentStatus::Transferred => write!(f, "transferred"),
            EnrollmentStatus::Passed => write!(f, "passed"),
            EnrollmentStatus::Failed => write!(f, "failed"),
            EnrollmentStatus::Dropout => write!(f, "dropout"),
        }
    }
}
