//! Student Enrollments Entity
//!
//! One row per student per session. Roll numbers are unique within a
//! section for a session when present.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::EnrollmentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "student_enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:               i32,
    pub student_id:       i32,
    pub session_id:       i32,
    pub class_id:         i32,
    pub section_id:       i32,
    pub roll_number:      Option<String>,
    pub admission_number: Option<String>,
    pub enrollment_date:  chrono::NaiveDate,
    pub status:           EnrollmentStatus,
    pub is_active:        bool,
    pub created_at:       chrono::DateTime<chrono::Utc>,
    pub updated_at:       chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::auth_users::Entity",
        from = "Column::StudentId",
        to = "super::auth_users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Section,
}

impl Related<super::auth_users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Student.def() }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef { Relation::Session.def() }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef { Relation::Class.def() }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef { Relation::Section.def() }
}

impl ActiveModelBehavior for ActiveModel {}
