//! Subjects Entity
//!
//! School-scoped subjects. Deletion is soft by default (`is_active = false`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:          i32,
    pub school_code: String,
    pub name:        String,
    pub code:        Option<String>,
    pub description: Option<String>,
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
    #[sea_orm(has_many = "super::class_subjects::Entity")]
    ClassSubjects,
    #[sea_orm(has_many = "super::section_subject_teachers::Entity")]
    SectionSubjectTeachers,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef { Relation::School.def() }
}

impl Related<super::class_subjects::Entity> for Entity {
    fn to() -> RelationDef { Relation::ClassSubjects.def() }
}

impl Related<super::section_subject_teachers::Entity> for Entity {
    fn to() -> RelationDef { Relation::SectionSubjectTeachers.def() }
}

impl ActiveModelBehavior for ActiveModel {}
