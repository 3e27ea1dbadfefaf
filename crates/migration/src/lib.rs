//! # Campus Migrations
//!
//! Schema for the academic graph. Every uniqueness rule the engines rely on
//! is backed by an index here, including the partial indexes that only
//! constrain active rows.

pub use sea_orm_migration::prelude::*;

pub mod db;
mod m20250401_000001_create_schools_table;
mod m20250401_000002_create_auth_users_table;
mod m20250401_000003_create_sessions_table;
mod m20250401_000004_create_classes_and_sections_tables;
mod m20250401_000005_create_subjects_tables;
mod m20250401_000006_create_section_subject_teachers_table;
mod m20250401_000007_create_student_enrollments_table;
pub mod migrator;

pub use db::{DatabaseConfig, SslMode};
pub use migrator::Migrator;
