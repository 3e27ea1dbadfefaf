//! # Query Parameters
//!
//! Query-string types of the read and delete endpoints. Request bodies are
//! the engine commands from [`academics::commands`].

use academics::Id;
use serde::{Deserialize, Serialize};

/// `?includeInactive=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeInactiveQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?hardDelete=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardDeleteQuery {
    #[serde(default)]
    pub hard_delete: bool,
}

/// `?sessionId=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: Option<Id>,
}

/// Scope of the schedule and subject-teacher views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeQuery {
    /// Only assignments in sections of this school
    pub school_code: Option<String>,
    /// Only count students enrolled in this session
    pub session_id:  Option<Id>,
}

/// Filter of the available-teachers view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTeachersQuery {
    pub subject_id:       Option<Id>,
    /// Omit teachers already teaching `subject_id`
    #[serde(default)]
    pub exclude_assigned: bool,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status:         &'static str,
    pub version:        &'static str,
    pub uptime_seconds: u64,
}
