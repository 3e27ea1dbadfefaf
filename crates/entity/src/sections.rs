//! Sections Entity
//!
//! A division of a class. `school_code` is denormalized from the class so
//! school-wide queries avoid a join.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:               i32,
    pub school_code:      String,
    pub class_id:         i32,
    pub name:             String,
    pub capacity:         i32,
    pub class_teacher_id: Option<i32>,
    pub room:             Option<String>,
    pub is_active:        bool,
    pub created_at:       chrono::DateTime<chrono::Utc>,
    pub updated_at:       chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::auth_users::Entity",
        from = "Column::ClassTeacherId",
        to = "super::auth_users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ClassTeacher,
    #[sea_orm(has_many = "super::section_subject_teachers::Entity")]
    SectionSubjectTeachers,
    #[sea_orm(has_many = "super::student_enrollments::Entity")]
    StudentEnrollments,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef { Relation::Class.def() }
}

impl Related<super::auth_users::Entity> for Entity {
    fn to() -> RelationDef { Relation::ClassTeacher.def() }
}

impl Related<super::section_subject_teachers::Entity> for Entity {
    fn to() -> RelationDef { Relation::SectionSubjectTeachers.def() }
}

impl Related<super::student_enrollments::Entity> for Entity {
    fn to() -> RelationDef { Relation::StudentEnrollments.def() }
}

impl ActiveModelBehavior for ActiveModel {}
