//! Section Subject Teachers Entity
//!
//! Teacher assignments. At most one active row per (section, subject),
//! enforced by a partial unique index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "section_subject_teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub section_id: i32,
    pub subject_id: i32,
    pub teacher_id: i32,
    pub is_active:  bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::auth_users::Entity",
        from = "Column::TeacherId",
        to = "super::auth_users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Teacher,
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef { Relation::Section.def() }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef { Relation::Subject.def() }
}

impl Related<super::auth_users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Teacher.def() }
}

impl ActiveModelBehavior for ActiveModel {}
