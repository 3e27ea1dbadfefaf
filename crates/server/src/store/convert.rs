//! Row to record mapping between the entity models and the engine's types.

use academics::{
    model::{Assignment, Class, ClassSubject, Enrollment, EnrollmentStatus, School, Section, Session, Subject},
    Role,
    UserSummary,
};
use entity::{
    auth_users,
    class_subjects,
    classes,
    schools,
    section_subject_teachers,
    sea_orm_active_enums::{EnrollmentStatus as DbEnrollmentStatus, UserRole},
    sections,
    sessions,
    student_enrollments,
    subjects,
};

pub(crate) fn school(row: schools::Model) -> School {
    School {
        id:               row.id,
        code:             row.code,
        name:             row.name,
        address:          row.address,
        phone:            row.phone,
        email:            row.email,
        base_url:         row.base_url,
        logo_path:        row.logo_path,
        banner_path:      row.banner_path,
        payment_link:     row.payment_link,
        principal_name:   row.principal_name,
        established_year: row.established_year,
        is_active:        row.is_active,
        created_at:       row.created_at,
        updated_at:       row.updated_at,
    }
}

pub(crate) fn session(row: sessions::Model) -> Session {
    Session {
        id:          row.id,
        school_code: row.school_code,
        name:        row.name,
        start_date:  row.start_date,
        end_date:    row.end_date,
        is_active:   row.is_active,
        created_at:  row.created_at,
        updated_at:  row.updated_at,
    }
}

pub(crate) fn class(row: classes::Model) -> Class {
    Class {
        id:          row.id,
        school_code: row.school_code,
        name:        row.name,
        level:       row.level,
        description: row.description,
        is_active:   row.is_active,
        created_at:  row.created_at,
        updated_at:  row.updated_at,
    }
}

pub(crate) fn section(row: sections::Model) -> Section {
    Section {
        id:               row.id,
        school_code:      row.school_code,
        class_id:         row.class_id,
        name:             row.name,
        capacity:         row.capacity,
        class_teacher_id: row.class_teacher_id,
        room:             row.room,
        is_active:        row.is_active,
        created_at:       row.created_at,
        updated_at:       row.updated_at,
    }
}

pub(crate) fn subject(row: subjects::Model) -> Subject {
    Subject {
        id:          row.id,
        school_code: row.school_code,
        name:        row.name,
        code:        row.code,
        description: row.description,
        is_active:   row.is_active,
        created_at:  row.created_at,
        updated_at:  row.updated_at,
    }
}

pub(crate) fn class_subject(row: class_subjects::Model) -> ClassSubject {
    ClassSubject {
        id:         row.id,
        class_id:   row.class_id,
        subject_id: row.subject_id,
        created_at: row.created_at,
    }
}

pub(crate) fn assignment(row: section_subject_teachers::Model) -> Assignment {
    Assignment {
        id:         row.id,
        section_id: row.section_id,
        subject_id: row.subject_id,
        teacher_id: row.teacher_id,
        is_active:  row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub(crate) fn enrollment(row: student_enrollments::Model) -> Enrollment {
    Enrollment {
        id:               row.id,
        student_id:       row.student_id,
        session_id:       row.session_id,
        class_id:         row.class_id,
        section_id:       row.section_id,
        roll_number:      row.roll_number,
        admission_number: row.admission_number,
        enrollment_date:  row.enrollment_date,
        status:           status(row.status),
        is_active:        row.is_active,
        created_at:       row.created_at,
        updated_at:       row.updated_at,
    }
}

pub(crate) fn user(row: auth_users::Model) -> UserSummary {
    UserSummary {
        id:            row.id,
        full_name:     row.full_name,
        email:         row.email,
        mobile_number: row.mobile_number,
        qualification: row.qualification,
        role:          role(row.role),
        is_active:     row.is_active,
        school_id:     row.school_id,
    }
}

pub(crate) fn role(role: UserRole) -> Role {
    match role {
        UserRole::SuperAdmin => Role::SuperAdmin,
        UserRole::Admin => Role::Admin,
        UserRole::Principal => Role::Principal,
        UserRole::Teacher => Role::Teacher,
        UserRole::Staff => Role::Staff,
        UserRole::Student => Role::Student,
    }
}

pub(crate) fn status(status: DbEnrollmentStatus) -> EnrollmentStatus {
    match status {
        DbEnrollmentStatus::Active => EnrollmentStatus::Active,
        DbEnrollmentStatus::Transferred => EnrollmentStatus::Transferred,
        DbEnrollmentStatus::Passed => EnrollmentStatus::Passed,
        DbEnrollmentStatus::Failed => EnrollmentStatus::Failed,
        DbEnrollmentStatus::Dropout => EnrollmentStatus::Dropout,
    }
}

pub(crate) fn db_status(status: EnrollmentStatus) -> DbEnrollmentStatus {
    match status {
        EnrollmentStatus::Active => DbEnrollmentStatus::Active,
        EnrollmentStatus::Transferred => DbEnrollmentStatus::Transferred,
        EnrollmentStatus::Passed => DbEnrollmentStatus::Passed,
        EnrollmentStatus::Failed => DbEnrollmentStatus::Failed,
        EnrollmentStatus::Dropout => DbEnrollmentStatus::Dropout,
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Iterable;

    use super::*;

    #[test]
    fn test_roles_keep_their_names() {
        for db_role in UserRole::iter() {
            assert_eq!(role(db_role).as_str(), db_role.to_string());
        }
    }

    #[test]
    fn test_statuses_map_both_ways() {
        for status in EnrollmentStatus::ALL {
            assert_eq!(super::status(db_status(status)), status);
        }
    }
}
