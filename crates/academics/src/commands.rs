//! # Commands
//!
//! Typed inputs of every mutating operation. Each command is deserialized
//! from the camelCase wire shape and validated by the engine before any store
//! call is made.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::{EnrollmentStatus, Id};

fn default_true() -> bool { true }

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchool {
    #[validate(length(min = 1, max = 50, message = "School code must be between 1 and 50 characters"))]
    pub code:             String,
    #[validate(length(min = 1, max = 255, message = "School name must be between 1 and 255 characters"))]
    pub name:             String,
    pub address:          Option<String>,
    #[validate(length(max = 20, message = "Phone must not exceed 20 characters"))]
    pub phone:            Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:            Option<String>,
    #[validate(url(message = "Invalid base URL"))]
    pub base_url:         Option<String>,
    pub logo_path:        Option<String>,
    pub banner_path:      Option<String>,
    pub payment_link:     Option<String>,
    pub principal_name:   Option<String>,
    #[validate(range(min = 1800, max = 2100, message = "Established year is out of range"))]
    pub established_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_session_window"))]
pub struct CreateSession {
    #[validate(length(min = 1, max = 100, message = "Session name must be between 1 and 100 characters"))]
    pub name:       String,
    pub start_date: NaiveDate,
    pub end_date:   NaiveDate,
    #[serde(default)]
    pub is_active:  bool,
}

fn validate_session_window(session: &CreateSession) -> Result<(), ValidationError> {
    if session.end_date < session.start_date {
        return Err(ValidationError::new("session_window").with_message("End date must not precede start date".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClass {
    #[validate(length(min = 1, max = 100, message = "Class name must be between 1 and 100 characters"))]
    pub name:        String,
    #[validate(range(min = 0, message = "Class level must not be negative"))]
    pub level:       i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSection {
    #[validate(length(min = 1, max = 50, message = "Section name must be between 1 and 50 characters"))]
    pub name:             String,
    /// Falls back to the configured default capacity.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity:         Option<i32>,
    pub class_teacher_id: Option<Id>,
    #[validate(length(max = 50, message = "Room must not exceed 50 characters"))]
    pub room:             Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubject {
    #[validate(length(min = 1, max = 100, message = "Subject name must be between 1 and 100 characters"))]
    pub name:        String,
    #[validate(length(min = 1, max = 20, message = "Subject code must be between 1 and 20 characters"))]
    pub code:        Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active:   bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubject {
    #[validate(length(min = 1, max = 100, message = "Subject name must be between 1 and 100 characters"))]
    pub name:        Option<String>,
    #[validate(length(min = 1, max = 20, message = "Subject code must be between 1 and 20 characters"))]
    pub code:        Option<String>,
    pub description: Option<String>,
    pub is_active:   Option<bool>,
}

/// A single subject id or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectIds {
    One(Id),
    Many(Vec<Id>),
}

impl SubjectIds {
    /// The requested ids with duplicates removed, in first-seen order.
    pub fn to_vec(&self) -> Vec<Id> {
        match self {
            SubjectIds::One(id) => vec![*id],
            SubjectIds::Many(ids) => {
                let mut unique = Vec::with_capacity(ids.len());
                for id in ids {
                    if !unique.contains(id) {
                        unique.push(*id);
                    }
                }
                unique
            },
        }
    }
}

fn validate_subject_ids(ids: &SubjectIds) -> Result<(), ValidationError> {
    if let SubjectIds::Many(list) = ids {
        if list.is_empty() {
            return Err(ValidationError::new("subject_ids").with_message("At least one subject id is required".into()));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignSubjects {
    pub class_id:    Id,
    #[validate(custom(function = "validate_subject_ids"))]
    pub subject_ids: SubjectIds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeacher {
    pub section_id: Id,
    pub subject_id: Id,
    pub teacher_id: Id,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignment {
    pub teacher_id: Option<Id>,
    pub is_active:  Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignTeachers {
    #[serde(default)]
    #[validate(length(min = 1, message = "Assignments array is required and must not be empty"))]
    pub assignments: Vec<AssignTeacher>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollStudent {
    pub student_id:       Id,
    pub session_id:       Id,
    pub class_id:         Id,
    pub section_id:       Id,
    #[validate(length(min = 1, max = 20, message = "Roll number must be between 1 and 20 characters"))]
    pub roll_number:      Option<String>,
    #[validate(length(min = 1, max = 50, message = "Admission number must be between 1 and 50 characters"))]
    pub admission_number: Option<String>,
    /// Today when absent.
    pub enrollment_date:  Option<NaiveDate>,
    /// `active` when absent.
    pub status:           Option<EnrollmentStatus>,
}
