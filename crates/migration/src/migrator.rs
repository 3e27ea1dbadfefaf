//! # Database Migrator
//!
//! Sea-ORM migrator listing every schema migration in execution order.

use sea_orm_migration::prelude::*;

use crate::{
    m20250401_000001_create_schools_table,
    m20250401_000002_create_auth_users_table,
    m20250401_000003_create_sessions_table,
    m20250401_000004_create_classes_and_sections_tables,
    m20250401_000005_create_subjects_tables,
    m20250401_000006_create_section_subject_teachers_table,
    m20250401_000007_create_student_enrollments_table,
};

/// The migrator applied by `campus migrate` and by the persistence tests.
///
/// # Example
///
/// ```rust,ignore
/// use migration::{Migrator, MigratorTrait};
///
/// Migrator::up(&db, None).await?;
/// ```
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250401_000001_create_schools_table::Migration),
            Box::new(m20250401_000002_create_auth_users_table::Migration),
            Box::new(m20250401_000003_create_sessions_table::Migration),
            Box::new(m20250401_000004_create_classes_and_sections_tables::Migration),
            Box::new(m20250401_000005_create_subjects_tables::Migration),
            Box::new(m20250401_000006_create_section_subject_teachers_table::Migration),
            Box::new(m20250401_000007_create_student_enrollments_table::Migration),
        ]
    }
}
