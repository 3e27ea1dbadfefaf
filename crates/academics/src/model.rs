//! # Domain Records
//!
//! Persisted state of the academic graph as the engines see it. These types
//! are storage-agnostic: the SeaORM store and the in-memory store both map
//! their rows into them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use error::AppError;
use serde::{Deserialize, Serialize};

/// Primary key type shared by every table.
pub type Id = i32;

/// A tenant. Every other record is scoped by its `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id:               Id,
    pub code:             String,
    pub name:             String,
    pub address:          Option<String>,
    pub phone:            Option<String>,
    pub email:            Option<String>,
    pub base_url:         Option<String>,
    pub logo_path:        Option<String>,
    pub banner_path:      Option<String>,
    pub payment_link:     Option<String>,
    pub principal_name:   Option<String>,
    pub established_year: Option<i32>,
    pub is_active:        bool,
    pub created_at:       DateTime<Utc>,
    pub updated_at:       DateTime<Utc>,
}

/// An academic year or term window. At most one per school is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id:          Id,
    pub school_code: String,
    pub name:        String,
    pub start_date:  NaiveDate,
    pub end_date:    NaiveDate,
    pub is_active:   bool,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id:          Id,
    pub school_code: String,
    pub name:        String,
    /// Ordering key inside a school.
    pub level:       i32,
    pub description: Option<String>,
    pub is_active:   bool,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id:               Id,
    /// Denormalized from the parent class.
    pub school_code:      String,
    pub class_id:         Id,
    pub name:             String,
    pub capacity:         i32,
    pub class_teacher_id: Option<Id>,
    pub room:             Option<String>,
    pub is_active:        bool,
    pub created_at:       DateTime<Utc>,
    pub updated_at:       DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id:          Id,
    pub school_code: String,
    pub name:        String,
    /// Unique among the active subjects of a school when present.
    pub code:        Option<String>,
    pub description: Option<String>,
    pub is_active:   bool,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

/// Catalog membership of a subject in a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSubject {
    pub id:         Id,
    pub class_id:   Id,
    pub subject_id: Id,
    pub created_at: DateTime<Utc>,
}

/// A Section x Subject -> Teacher binding. Inactive rows are kept as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id:         Id,
    pub section_id: Id,
    pub subject_id: Id,
    pub teacher_id: Id,
    pub is_active:  bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id:               Id,
    pub student_id:       Id,
    pub session_id:       Id,
    pub class_id:         Id,
    pub section_id:       Id,
    pub roll_number:      Option<String>,
    pub admission_number: Option<String>,
    pub enrollment_date:  NaiveDate,
    pub status:           EnrollmentStatus,
    pub is_active:        bool,
    pub created_at:       DateTime<Utc>,
    pub updated_at:       DateTime<Utc>,
}

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Transferred,
    Passed,
    Failed,
    Dropout,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 5] = [
        EnrollmentStatus::Active,
        EnrollmentStatus::Transferred,
        EnrollmentStatus::Passed,
        EnrollmentStatus::Failed,
        EnrollmentStatus::Dropout,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Transferred => "transferred",
            EnrollmentStatus::Passed => "passed",
            EnrollmentStatus::Failed => "failed",
            EnrollmentStatus::Dropout => "dropout",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for EnrollmentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::validation(format!("Unknown enrollment status: {}", s)))
    }
}
