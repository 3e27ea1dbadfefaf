//! # Identity Directory
//!
//! Read-only lookups into the identity system's `auth_users` table.

use academics::{Id, IdentityDirectory, UserSummary};
use async_trait::async_trait;
use entity::{auth_users, sea_orm_active_enums::UserRole};
use error::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::convert;

/// [`IdentityDirectory`] over a Sea-ORM connection pool.
#[derive(Debug, Clone)]
pub struct SeaOrmDirectory {
    db: DatabaseConnection,
}

impl SeaOrmDirectory {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl IdentityDirectory for SeaOrmDirectory {
    async fn find_user(&self, id: Id) -> Result<Option<UserSummary>> {
        Ok(auth_users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(convert::user))
    }

    async fn find_users(&self, ids: &[Id]) -> Result<Vec<UserSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = auth_users::Entity::find()
            .filter(auth_users::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::user).collect())
    }

    async fn list_teaching_staff(&self, school_id: Id) -> Result<Vec<UserSummary>> {
        let rows = auth_users::Entity::find()
            .filter(auth_users::Column::SchoolId.eq(school_id))
            .filter(auth_users::Column::IsActive.eq(true))
            .filter(auth_users::Column::Role.is_in([UserRole::Teacher, UserRole::Principal]))
            .order_by_asc(auth_users::Column::FullName)
            .order_by_asc(auth_users::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(convert::user).collect())
    }
}
