//! # Academic Graph Scenarios
//!
//! End-to-end engine behaviour over the in-memory store.

use std::sync::{Arc, Once};

use academics::{
    commands::{
        AssignSubjects,
        AssignTeacher,
        BulkAssignTeachers,
        CreateClass,
        CreateSchool,
        CreateSection,
        CreateSession,
        CreateSubject,
        EnrollStudent,
        SubjectIds,
        UpdateAssignment,
        UpdateSubject,
    },
    memory::MemoryStore,
    model::{Class, Id, School, Section, Session, Subject},
    store::{AcademicStore, AssignmentFilter, NewSubject, SubjectChanges},
    Academics,
    AcademicsConfig,
    Role,
    UserSummary,
};
use chrono::NaiveDate;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

const T1: Id = 101;
const T2: Id = 102;
const STAFF: Id = 103;
const S1: Id = 201;
const S2: Id = 202;

fn user(id: Id, name: &str, role: Role, school_id: Id) -> UserSummary {
    UserSummary {
        id,
        full_name: name.to_string(),
        email: format!("{}@dps.edu.in", name.to_lowercase().replace(' ', ".")),
        mobile_number: Some("9800000000".to_string()),
        qualification: Some("M.Sc".to_string()),
        role,
        is_active: true,
        school_id: Some(school_id),
    }
}

struct World {
    store:     Arc<MemoryStore>,
    academics: Academics,
    school:    School,
    session:   Session,
    class:     Class,
    section:   Section,
    math:      Subject,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

fn session_cmd(name: &str, is_active: bool) -> CreateSession {
    CreateSession {
        name: name.to_string(),
        start_date: date(2025, 4, 1),
        end_date: date(2026, 3, 31),
        is_active,
    }
}

fn subject_cmd(name: &str, code: &str) -> CreateSubject {
    CreateSubject {
        name:        name.to_string(),
        code:        Some(code.to_string()),
        description: None,
        is_active:   true,
    }
}

async fn world_with(config: AcademicsConfig) -> World {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let academics = Academics::new(store.clone(), store.clone(), config);

    let school = academics
        .structure
        .create_school(CreateSchool {
            code:             "DPS001".to_string(),
            name:             "Delhi Public School".to_string(),
            address:          None,
            phone:            None,
            email:            None,
            base_url:         None,
            logo_path:        None,
            banner_path:      None,
            payment_link:     None,
            principal_name:   None,
            established_year: Some(1972),
        })
        .await
        .unwrap();

    store.add_user(user(T1, "Priya Sharma", Role::Teacher, school.id)).await;
    store.add_user(user(T2, "Rajesh Kumar", Role::Teacher, school.id)).await;
    store.add_user(user(STAFF, "Office Staff", Role::Staff, school.id)).await;
    store.add_user(user(S1, "Student One", Role::Student, school.id)).await;
    store.add_user(user(S2, "Student Two", Role::Student, school.id)).await;

    let session = academics
        .structure
        .create_session("DPS001", session_cmd("Y1", true))
        .await
        .unwrap();
    let class = academics
        .structure
        .create_class("DPS001", CreateClass {
            name:        "Class 1".to_string(),
            level:       1,
            description: None,
        })
        .await
        .unwrap();
    let section = academics
        .structure
        .create_section("DPS001", class.id, CreateSection {
            name:             "A".to_string(),
            capacity:         None,
            class_teacher_id: Some(T1),
            room:             Some("Room 101".to_string()),
        })
        .await
        .unwrap();
    let math = academics
        .structure
        .create_subject("DPS001", subject_cmd("Mathematics", "MATH"))
        .await
        .unwrap();
    academics
        .structure
        .assign_subjects(AssignSubjects {
            class_id:    class.id,
            subject_ids: SubjectIds::One(math.id),
        })
        .await
        .unwrap();

    World {
        store,
        academics,
        school,
        session,
        class,
        section,
        math,
    }
}

async fn world() -> World { world_with(AcademicsConfig::default()).await }

fn assign(section_id: Id, subject_id: Id, teacher_id: Id) -> AssignTeacher {
    AssignTeacher {
        section_id,
        subject_id,
        teacher_id,
    }
}

fn enroll(w: &World, student_id: Id, roll: Option<&str>) -> EnrollStudent {
    EnrollStudent {
        student_id,
        session_id: w.session.id,
        class_id: w.class.id,
        section_id: w.section.id,
        roll_number: roll.map(str::to_string),
        admission_number: None,
        enrollment_date: None,
        status: None,
    }
}

#[tokio::test]
async fn test_second_teacher_for_pair_conflicts_with_current_teacher() {
    let w = world().await;

    let detail = w
        .academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, T1))
        .await
        .unwrap();
    assert_eq!(detail.assignment.teacher_id, T1);
    assert_eq!(detail.section.class.name, "Class 1");
    assert_eq!(detail.subject.code.as_deref(), Some("MATH"));

    let err = w
        .academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, T2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(err.details().unwrap()["currentTeacherId"], T1);
}

#[tokio::test]
async fn test_assignment_requires_subject_in_class_catalog() {
    let w = world().await;
    let art = w
        .academics
        .structure
        .create_subject("DPS001", subject_cmd("Art", "ART"))
        .await
        .unwrap();

    let err = w
        .academics
        .assignments
        .assign_teacher(assign(w.section.id, art.id, T1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_STATE");
    assert_eq!(err.message(), "Subject is not assigned to this class");
}

#[tokio::test]
async fn test_assignment_teacher_rules() {
    let w = world().await;

    let err = w
        .academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, STAFF))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");

    w.store.set_user_active(T2, false).await;
    let err = w
        .academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, T2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_reassign_and_remove() {
    let w = world().await;
    let first = w
        .academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, T1))
        .await
        .unwrap();

    let updated = w
        .academics
        .assignments
        .update_assignment(first.assignment.id, UpdateAssignment {
            teacher_id: Some(T2),
            is_active:  None,
        })
        .await
        .unwrap();
    assert_eq!(updated.assignment.teacher_id, T2);
    assert!(updated.assignment.is_active);

    w.academics
        .assignments
        .remove_assignment(first.assignment.id, false)
        .await
        .unwrap();
    let view = w.academics.assignments.section_teachers(w.section.id).await.unwrap();
    assert!(view.subject_teachers.is_empty());

    // The pair is free again once the old row is inactive.
    w.academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, T1))
        .await
        .unwrap();
    let err = w
        .academics
        .assignments
        .update_assignment(first.assignment.id, UpdateAssignment {
            teacher_id: None,
            is_active:  Some(true),
        })
        .await
        .unwrap_err();
    assert_eq!(err.details().unwrap()["currentTeacherId"], T1);
}

#[tokio::test]
async fn test_duplicate_roll_number_conflicts() {
    let w = world().await;

    let detail = w
        .academics
        .enrollments
        .enroll("DPS001", enroll(&w, S1, Some("5")))
        .await
        .unwrap();
    assert_eq!(detail.enrollment.roll_number.as_deref(), Some("5"));
    assert_eq!(detail.session.name, "Y1");
    assert_eq!(detail.student.id, S1);

    let err = w
        .academics
        .enrollments
        .enroll("DPS001", enroll(&w, S2, Some("5")))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    let err = w
        .academics
        .enrollments
        .enroll("DPS001", enroll(&w, S1, Some("6")))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Student is already enrolled for this session");
}

#[tokio::test]
async fn test_enrollment_missing_entities() {
    let w = world().await;

    let err = w
        .academics
        .enrollments
        .enroll("NOPE", enroll(&w, S1, None))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "School not found");

    let mut cmd = enroll(&w, S1, None);
    cmd.section_id = 9999;
    let err = w.academics.enrollments.enroll("DPS001", cmd).await.unwrap_err();
    assert_eq!(err.message(), "One or more entities not found");
}

#[tokio::test]
async fn test_cross_tenant_enrollment_depends_on_strictness() {
    let lax = world().await;
    lax.academics
        .structure
        .create_school(CreateSchool {
            code:             "KV002".to_string(),
            name:             "Kendriya Vidyalaya".to_string(),
            address:          None,
            phone:            None,
            email:            None,
            base_url:         None,
            logo_path:        None,
            banner_path:      None,
            payment_link:     None,
            principal_name:   None,
            established_year: None,
        })
        .await
        .unwrap();
    // Session, class and section all belong to DPS001.
    assert!(lax.academics.enrollments.enroll("KV002", enroll(&lax, S1, None)).await.is_ok());

    let strict = world_with(AcademicsConfig {
        strict_enrollment_tenancy: true,
        ..Default::default()
    })
    .await;
    strict
        .academics
        .structure
        .create_school(CreateSchool {
            code:             "KV002".to_string(),
            name:             "Kendriya Vidyalaya".to_string(),
            address:          None,
            phone:            None,
            email:            None,
            base_url:         None,
            logo_path:        None,
            banner_path:      None,
            payment_link:     None,
            principal_name:   None,
            established_year: None,
        })
        .await
        .unwrap();
    let err = strict
        .academics
        .enrollments
        .enroll("KV002", enroll(&strict, S1, None))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_STATE");
}

#[tokio::test]
async fn test_students_by_section_sort_roll_numbers_as_strings() {
    let w = world().await;
    for (student, roll) in [(S1, "2"), (S2, "10")] {
        w.academics
            .enrollments
            .enroll("DPS001", enroll(&w, student, Some(roll)))
            .await
            .unwrap();
    }

    let students = w
        .academics
        .enrollments
        .students_by_section(w.section.id, Some(w.session.id))
        .await
        .unwrap();
    let rolls: Vec<&str> = students
        .iter()
        .filter_map(|s| s.enrollment.roll_number.as_deref())
        .collect();
    assert_eq!(rolls, vec!["10", "2"]);
    assert_eq!(students[0].session.as_ref().unwrap().name, "Y1");
}

#[tokio::test]
async fn test_remove_subject_blocked_while_taught() {
    let w = world().await;
    let assigned = w
        .academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, T1))
        .await
        .unwrap();

    let err = w
        .academics
        .structure
        .remove_subject_from_class(w.class.id, w.math.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(err.details().unwrap()["activeAssignments"], 1);

    w.academics
        .assignments
        .remove_assignment(assigned.assignment.id, false)
        .await
        .unwrap();
    w.academics
        .structure
        .remove_subject_from_class(w.class.id, w.math.id)
        .await
        .unwrap();

    let view = w.academics.structure.class_subjects(w.class.id).await.unwrap();
    assert!(view.subjects.is_empty());
}

#[tokio::test]
async fn test_assign_subjects_is_idempotent_and_all_or_nothing() {
    let w = world().await;
    let science = w
        .academics
        .structure
        .create_subject("DPS001", subject_cmd("Science", "SCI"))
        .await
        .unwrap();

    for _ in 0 .. 2 {
        let view = w
            .academics
            .structure
            .assign_subjects(AssignSubjects {
                class_id:    w.class.id,
                subject_ids: SubjectIds::Many(vec![w.math.id, science.id]),
            })
            .await
            .unwrap();
        let names: Vec<&str> = view.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mathematics", "Science"]);
    }

    let err = w
        .academics
        .structure
        .assign_subjects(AssignSubjects {
            class_id:    w.class.id,
            subject_ids: SubjectIds::Many(vec![science.id, 9999]),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_subject_lifecycle() {
    let w = world().await;

    let err = w
        .academics
        .structure
        .create_subject("DPS001", subject_cmd("Maths Again", "MATH"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Subject with this code already exists");

    let english = w
        .academics
        .structure
        .create_subject("DPS001", subject_cmd("English", "ENG"))
        .await
        .unwrap();
    let err = w
        .academics
        .structure
        .update_subject(english.id, UpdateSubject {
            code: Some("MATH".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    // Math is in the Class 1 catalog.
    let err = w.academics.structure.delete_subject(w.math.id, false).await.unwrap_err();
    assert_eq!(err.details().unwrap()["assignedClasses"], 1);
    assert_eq!(err.details().unwrap()["assignedTeachers"], 0);

    w.academics.structure.delete_subject(english.id, false).await.unwrap();
    let listed = w.academics.structure.subjects_by_school("DPS001", false).await.unwrap();
    assert!(listed.subjects.iter().all(|s| s.subject.id != english.id));
    assert_eq!(listed.count, 1);
    assert_eq!(listed.subjects[0].classes[0].name, "Class 1");

    let all = w.academics.structure.subjects_by_school("DPS001", true).await.unwrap();
    assert!(all.subjects.iter().any(|s| s.subject.id == english.id && !s.subject.is_active));
}

#[tokio::test]
async fn test_session_activation_is_exclusive() {
    let w = world().await;
    let y2 = w
        .academics
        .structure
        .create_session("DPS001", session_cmd("Y2", true))
        .await
        .unwrap();
    w.academics
        .structure
        .create_session("DPS001", session_cmd("Draft", false))
        .await
        .unwrap();

    let sessions = w.academics.structure.sessions_by_school("DPS001").await.unwrap();
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0].name, "Draft");
    let active: Vec<Id> = sessions.iter().filter(|s| s.is_active).map(|s| s.id).collect();
    assert_eq!(active, vec![y2.id]);
}

#[tokio::test]
async fn test_concurrent_active_sessions_leave_one_active() {
    let w = world().await;

    let mut handles = Vec::new();
    for i in 0 .. 16 {
        let structure = w.academics.structure.clone();
        handles.push(tokio::spawn(async move {
            structure
                .create_session("DPS001", session_cmd(&format!("S{}", i), true))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let sessions = w.academics.structure.sessions_by_school("DPS001").await.unwrap();
    assert_eq!(sessions.iter().filter(|s| s.is_active).count(), 1);
}

#[tokio::test]
async fn test_duplicate_class_and_section_names() {
    let w = world().await;
    let err = w
        .academics
        .structure
        .create_class("DPS001", CreateClass {
            name:        "Class 1".to_string(),
            level:       1,
            description: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    let err = w
        .academics
        .structure
        .create_section("DPS001", w.class.id, CreateSection {
            name:             "A".to_string(),
            capacity:         Some(40),
            class_teacher_id: None,
            room:             None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    let lax = world_with(AcademicsConfig {
        enforce_unique_class_names: false,
        ..Default::default()
    })
    .await;
    assert!(lax
        .academics
        .structure
        .create_class("DPS001", CreateClass {
            name:        "Class 1".to_string(),
            level:       1,
            description: None,
        })
        .await
        .is_ok());
}

#[tokio::test]
async fn test_section_in_other_school_is_not_found() {
    let w = world().await;
    let err = w
        .academics
        .structure
        .create_section("OTHER", w.class.id, CreateSection {
            name:             "B".to_string(),
            capacity:         None,
            class_teacher_id: None,
            room:             None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Class not found");

    let err = w
        .academics
        .structure
        .create_section("DPS001", w.class.id, CreateSection {
            name:             "B".to_string(),
            capacity:         None,
            class_teacher_id: Some(S1),
            room:             None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_school_structure_tree() {
    let w = world().await;
    let structure = w.academics.structure.school_structure("DPS001").await.unwrap();

    assert_eq!(structure.school.code, "DPS001");
    assert_eq!(structure.active_session.unwrap().name, "Y1");
    assert_eq!(structure.classes.len(), 1);
    let section = &structure.classes[0].sections[0];
    assert_eq!(section.section.capacity, 30);
    assert_eq!(section.class_teacher.as_ref().unwrap().full_name, "Priya Sharma");
}

#[tokio::test]
async fn test_schedule_counts_students_per_assignment() {
    let w = world().await;
    let science = w
        .academics
        .structure
        .create_subject("DPS001", subject_cmd("Science", "SCI"))
        .await
        .unwrap();
    w.academics
        .structure
        .assign_subjects(AssignSubjects {
            class_id:    w.class.id,
            subject_ids: SubjectIds::One(science.id),
        })
        .await
        .unwrap();
    for (student, roll) in [(S1, "1"), (S2, "2")] {
        w.academics
            .enrollments
            .enroll("DPS001", enroll(&w, student, Some(roll)))
            .await
            .unwrap();
    }

    let created = w
        .academics
        .assignments
        .bulk_assign(BulkAssignTeachers {
            assignments: vec![
                assign(w.section.id, w.math.id, T1),
                assign(w.section.id, science.id, T1),
            ],
        })
        .await
        .unwrap();
    assert_eq!(created.created, 2);

    let schedule = w
        .academics
        .assignments
        .teacher_schedule(T1, Some("DPS001".to_string()), Some(w.session.id))
        .await
        .unwrap();
    assert_eq!(schedule.workload_stats.total_assignments, 2);
    assert_eq!(schedule.workload_stats.total_sections, 1);
    assert_eq!(schedule.workload_stats.total_subjects, 2);
    assert_eq!(schedule.workload_stats.total_students, 4);
    assert_eq!(schedule.schedule.len(), 1);
    assert_eq!(schedule.schedule[0].key, "Class 1-A");
    assert_eq!(schedule.schedule[0].section.student_count, 2);
    let subjects: Vec<&str> = schedule.schedule[0].subjects.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(subjects, vec!["Mathematics", "Science"]);

    let by_subject = w
        .academics
        .assignments
        .teachers_by_subject(w.math.id, None, None)
        .await
        .unwrap();
    assert_eq!(by_subject.teachers.len(), 1);
    assert_eq!(by_subject.teachers[0].total_students, 2);
}

#[tokio::test]
async fn test_bulk_assign_reports_failing_entry_and_creates_nothing() {
    let w = world().await;

    let err = w
        .academics
        .assignments
        .bulk_assign(BulkAssignTeachers {
            assignments: vec![assign(w.section.id, w.math.id, T1), assign(9999, w.math.id, T2)],
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Assignment 2: Section not found or inactive");

    let err = w
        .academics
        .assignments
        .bulk_assign(BulkAssignTeachers {
            assignments: vec![assign(w.section.id, w.math.id, T1), assign(w.section.id, w.math.id, T2)],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    let err = w
        .academics
        .assignments
        .bulk_assign(BulkAssignTeachers {
            assignments: Vec::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Assignments array is required and must not be empty");

    let open = w.academics.assignments.unassigned_combinations("DPS001").await.unwrap();
    assert_eq!(open.total_unassigned, 1);
}

#[tokio::test]
async fn test_teaching_analytics_and_available_teachers() {
    let w = world().await;
    let art = w
        .academics
        .structure
        .create_subject("DPS001", subject_cmd("Art", "ART"))
        .await
        .unwrap();
    w.academics
        .structure
        .assign_subjects(AssignSubjects {
            class_id:    w.class.id,
            subject_ids: SubjectIds::One(art.id),
        })
        .await
        .unwrap();
    w.academics
        .assignments
        .assign_teacher(assign(w.section.id, w.math.id, T1))
        .await
        .unwrap();

    let analytics = w
        .academics
        .assignments
        .teaching_analytics("DPS001", None)
        .await
        .unwrap();
    assert_eq!(analytics.session.name, "Y1");
    assert_eq!(analytics.overview.total_teachers, 2);
    assert_eq!(analytics.overview.total_subjects, 2);
    assert_eq!(analytics.overview.total_assignments, 1);
    assert_eq!(analytics.overview.unassigned_count, 1);
    assert_eq!(analytics.teacher_workload.distribution.light, 1);
    assert_eq!(analytics.subject_coverage.covered, 1);
    assert_eq!(analytics.subject_coverage.uncovered_subjects[0].name, "Art");
    assert_eq!(analytics.unassigned_sections[0].unassigned_subjects, 1);
    assert_eq!(analytics.unassigned_sections[0].total_subjects, 2);

    let available = w
        .academics
        .assignments
        .available_teachers("DPS001", Some(w.math.id), true)
        .await
        .unwrap();
    let ids: Vec<Id> = available.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![T2]);

    let open = w.academics.assignments.unassigned_combinations("DPS001").await.unwrap();
    assert_eq!(open.sections[0].unassigned_subjects[0].name, "Art");
    assert_eq!(open.sections[0].section.class.name, "Class 1");

    let _ = w.school;
}

fn school_cmd(code: &str, name: &str) -> CreateSchool {
    CreateSchool {
        code:             code.to_string(),
        name:             name.to_string(),
        address:          None,
        phone:            None,
        email:            None,
        base_url:         None,
        logo_path:        None,
        banner_path:      None,
        payment_link:     None,
        principal_name:   None,
        established_year: None,
    }
}

#[tokio::test]
async fn test_schedule_scoping_excludes_other_schools_and_sessions() {
    let w = world().await;
    let next = w
        .academics
        .structure
        .create_session("DPS001", session_cmd("Y2", false))
        .await
        .unwrap();
    w.academics
        .enrollments
        .enroll("DPS001", enroll(&w, S1, Some("1")))
        .await
        .unwrap();
    let mut later = enroll(&w, S2, Some("2"));
    later.session_id = next.id;
    w.academics.enrollments.enroll("DPS001", later).await.unwrap();

    w.academics
        .structure
        .create_school(school_cmd("KVS002", "Kendriya Vidyalaya"))
        .await
        .unwrap();
    let other_class = w
        .academics
        .structure
        .create_class("KVS002", CreateClass {
            name:        "Class 1".to_string(),
            level:       1,
            description: None,
        })
        .await
        .unwrap();
    let other_section = w
        .academics
        .structure
        .create_section("KVS002", other_class.id, CreateSection {
            name:             "B".to_string(),
            capacity:         None,
            class_teacher_id: None,
            room:             None,
        })
        .await
        .unwrap();
    let other_math = w
        .academics
        .structure
        .create_subject("KVS002", subject_cmd("Mathematics", "MATH"))
        .await
        .unwrap();
    w.academics
        .structure
        .assign_subjects(AssignSubjects {
            class_id:    other_class.id,
            subject_ids: SubjectIds::One(other_math.id),
        })
        .await
        .unwrap();

    for (section_id, subject_id) in [(w.section.id, w.math.id), (other_section.id, other_math.id)] {
        w.academics
            .assignments
            .assign_teacher(assign(section_id, subject_id, T1))
            .await
            .unwrap();
    }

    let scoped = w
        .academics
        .assignments
        .teacher_schedule(T1, Some("DPS001".to_string()), Some(w.session.id))
        .await
        .unwrap();
    assert_eq!(scoped.workload_stats.total_assignments, 1);
    assert_eq!(scoped.workload_stats.total_students, 1);
    assert_eq!(scoped.schedule.len(), 1);
    assert_eq!(scoped.schedule[0].key, "Class 1-A");

    let other = w
        .academics
        .assignments
        .teacher_schedule(T1, Some("KVS002".to_string()), None)
        .await
        .unwrap();
    assert_eq!(other.workload_stats.total_assignments, 1);
    assert_eq!(other.workload_stats.total_students, 0);
    assert_eq!(other.schedule[0].key, "Class 1-B");

    let all = w
        .academics
        .assignments
        .teacher_schedule(T1, None, None)
        .await
        .unwrap();
    assert_eq!(all.workload_stats.total_assignments, 2);
    assert_eq!(all.workload_stats.total_classes, 2);
    assert_eq!(all.workload_stats.total_students, 2);
    assert_eq!(all.schedule.len(), 2);
}

#[tokio::test]
async fn test_concurrent_assignments_leave_one_active() {
    let w = world().await;

    let mut handles = Vec::new();
    for i in 0 .. 16 {
        let assignments = w.academics.assignments.clone();
        let (section_id, subject_id) = (w.section.id, w.math.id);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                assignments
                    .assign_teacher(assign(section_id, subject_id, T1))
                    .await
                    .map(|_| ())
            }
            else {
                assignments
                    .bulk_assign(BulkAssignTeachers {
                        assignments: vec![assign(section_id, subject_id, T2)],
                    })
                    .await
                    .map(|_| ())
            }
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => succeeded += 1,
            Err(err) => assert_eq!(err.code(), "CONFLICT"),
        }
    }
    assert_eq!(succeeded, 1);

    let active = w
        .store
        .list_assignments(AssignmentFilter {
            section_id: Some(w.section.id),
            subject_id: Some(w.math.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_store_rejects_duplicate_active_subject_code() {
    let w = world().await;
    let new_subject = |code: Option<&str>, is_active: bool| {
        NewSubject {
            school_code: "DPS001".to_string(),
            name: "Maths Again".to_string(),
            code: code.map(str::to_string),
            description: None,
            is_active,
        }
    };

    let err = w.store.insert_subject(new_subject(Some("MATH"), true)).await.unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(err.message(), "Subject with this code already exists");

    // Inactive rows and rows without a code are outside the constraint.
    let retired = w.store.insert_subject(new_subject(Some("MATH"), false)).await.unwrap();
    w.store.insert_subject(new_subject(None, true)).await.unwrap();
    w.store.insert_subject(new_subject(None, true)).await.unwrap();

    let err = w
        .store
        .update_subject(retired.id, SubjectChanges {
            is_active: Some(true),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    let science = w.store.insert_subject(new_subject(Some("SCI"), true)).await.unwrap();
    let err = w
        .store
        .update_subject(science.id, SubjectChanges {
            code: Some("MATH".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
}

#[tokio::test]
async fn test_concurrent_subject_creation_keeps_codes_unique() {
    let w = world().await;

    let mut handles = Vec::new();
    for i in 0 .. 8 {
        let structure = w.academics.structure.clone();
        handles.push(tokio::spawn(async move {
            structure
                .create_subject("DPS001", subject_cmd(&format!("Science {}", i), "SCI"))
                .await
        }));
    }
    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_removing_unlinked_subject_is_a_no_op() {
    let w = world().await;
    let art = w
        .academics
        .structure
        .create_subject("DPS001", subject_cmd("Art", "ART"))
        .await
        .unwrap();

    w.academics
        .structure
        .remove_subject_from_class(w.class.id, art.id)
        .await
        .unwrap();

    let view = w.academics.structure.class_subjects(w.class.id).await.unwrap();
    assert_eq!(view.subjects.len(), 1);
}

#[tokio::test]
async fn test_students_of_unknown_section_is_empty() {
    let w = world().await;
    let students = w
        .academics
        .enrollments
        .students_by_section(9_999, None)
        .await
        .unwrap();
    assert!(students.is_empty());
}
