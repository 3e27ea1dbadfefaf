//! Sessions Entity
//!
//! Academic years. At most one active session per school, backed by a
//! partial unique index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:          i32,
    pub school_code: String,
    pub name:        String,
    pub start_date:  chrono::NaiveDate,
    pub end_date:    chrono::NaiveDate,
    pub is_active:   bool,
    pub created_at:  chrono::DateTime<chrono::Utc>,
    pub updated_at:  chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolCode",
        to = "super::schools::Column::Code",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    School,
    #[sea_orm(has_many = "super::student_enrollments::Entity")]
    StudentEnrollments,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef { Relation::School.def() }
}

impl Related<super::student_enrollments::Entity> for Entity {
    fn to() -> RelationDef { Relation::StudentEnrollments.def() }
}

impl ActiveModelBehavior for ActiveModel {}
