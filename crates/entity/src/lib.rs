//! Entity definitions for Campus
//!
//! This crate contains Sea-ORM entity definitions for the database models.
//! Every table keyed by an auto-increment `i32`; tenancy is carried by
//! `school_code` on the structure tables.

pub mod sea_orm_active_enums;

pub mod schools;
pub use schools::Entity as Schools;
pub mod auth_users;
pub use auth_users::Entity as AuthUsers;
pub mod sessions;
pub use sessions::Entity as Sessions;
pub mod classes;
pub use classes::Entity as Classes;
pub mod sections;
pub use sections::Entity as Sections;
pub mod subjects;
pub use subjects::Entity as Subjects;
pub mod class_subjects;
pub use class_subjects::Entity as ClassSubjects;
pub mod section_subject_teachers;
pub use section_subject_teachers::Entity as SectionSubjectTeachers;
pub mod student_enrollments;
pub use student_enrollments::Entity as StudentEnrollments;
