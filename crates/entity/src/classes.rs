//! Classes Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:          i32,
    pub school_code: String,
    pub name:        String,
    pub level:       i32,
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
    #[sea_orm(has_many = "super::sections::Entity")]
    Sections,
    #[sea_orm(has_many = "super::class_subjects::Entity")]
    ClassSubjects,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef { Relation::School.def() }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef { Relation::Sections.def() }
}

impl Related<super::class_subjects::Entity> for Entity {
    fn to() -> RelationDef { Relation::ClassSubjects.def() }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef { super::class_subjects::Relation::Subject.def() }

    fn via() -> Option<RelationDef> { Some(super::class_subjects::Relation::Class.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}
