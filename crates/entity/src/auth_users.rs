//! Auth Users Entity
//!
//! Identity-system users. The academic engines read this table and never
//! write it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::UserRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "auth_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:            i32,
    pub full_name:     String,
    #[sea_orm(unique)]
    pub email:         String,
    pub mobile_number: Option<String>,
    pub qualification: Option<String>,
    pub role:          UserRole,
    pub school_id:     Option<i32>,
    pub is_active:     bool,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    School,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef { Relation::School.def() }
}

impl ActiveModelBehavior for ActiveModel {}
