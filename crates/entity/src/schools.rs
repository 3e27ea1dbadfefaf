//! Schools Entity
//!
//! The tenant. Structure tables reference a school by its unique `code`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:               i32,
    #[sea_orm(unique)]
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
    pub created_at:       chrono::DateTime<chrono::Utc>,
    pub updated_at:       chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
    #[sea_orm(has_many = "super::subjects::Entity")]
    Subjects,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef { Relation::Sessions.def() }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef { Relation::Classes.def() }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef { Relation::Subjects.def() }
}

impl ActiveModelBehavior for ActiveModel {}
