//! # API Router Configuration
//!
//! Configures the `/api/v1/schools` routes of the Campus API. The wrapper
//! functions below only extract request data and delegate to
//! [`crate::handlers`].

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
        UpdateAssignment,
        UpdateSubject,
    },
    model::{Class, Id, School, Section, Session, Subject},
    views::{
        AssignmentDetail,
        BulkAssignmentResult,
        ClassSubjectsView,
        ClassTree,
        ClassWithSubjects,
        EnrollmentDetail,
        SchoolDetail,
        SchoolStructure,
        SectionDetail,
        SectionStudent,
        SectionTeachers,
        SubjectList,
        SubjectTeachers,
        TeacherProfile,
        TeacherSchedule,
        TeachingAnalytics,
        UnassignedCombinations,
    },
};
use auth::Principal;
use axum::{
    extract::{Extension, State as AxumState},
    middleware,
    routing::{delete, get, post, put},
    Json,
    Router,
};
use error::{AppError, Result};

use crate::{
    dto::queries::{
        AvailableTeachersQuery,
        HardDeleteQuery,
        HealthResponse,
        IncludeInactiveQuery,
        ScopeQuery,
        SessionQuery,
    },
    extract::{JsonBody, PathParams, QueryParams},
    handlers::{assignments, enrollments, health, schools, structure, subjects, Created, Reply},
    middleware::{auth::auth_middleware, request_id::request_id_middleware},
    AppState,
};

/// Creates the `/api/v1/schools` router
///
/// # Arguments
///
/// * `state` - Application state containing the engines and JWT config
///
/// # Returns
///
/// Router with the public school views and the authenticated routes
pub fn create_router(state: AppState) -> Router {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .route("/create", post(create_school))
        .route(
            "/:schoolCode/sessions",
            post(create_session).get(sessions_by_school),
        )
        .route(
            "/:schoolCode/classes",
            post(create_class).get(classes_by_school),
        )
        .route(
            "/:schoolCode/classes/:classId/sections",
            post(create_section),
        )
        .route(
            "/:schoolCode/subjects",
            post(create_subject).get(subjects_by_school),
        )
        .route(
            "/:schoolCode/teaching-analytics",
            get(teaching_analytics),
        )
        .route(
            "/:schoolCode/available-teachers",
            get(available_teachers),
        )
        .route(
            "/:schoolCode/unassigned-combinations",
            get(unassigned_combinations),
        )
        .route("/:schoolCode/enrollments", post(enroll_student))
        .route("/classes/:classId/sections", get(sections_by_class))
        .route("/classes/assign-subjects", post(assign_subjects))
        .route("/classes/:classId/subjects", get(class_subjects))
        .route(
            "/classes/:classId/subjects/:subjectId",
            delete(remove_subject_from_class),
        )
        .route(
            "/subjects/:subjectId",
            put(update_subject).delete(delete_subject),
        )
        .route("/subjects/:subjectId/teachers", get(teachers_by_subject))
        .route("/assign-teacher-subject", post(assign_teacher))
        .route(
            "/assignments/:assignmentId",
            put(update_assignment).delete(remove_assignment),
        )
        .route("/teachers/:teacherId/schedule", get(teacher_schedule))
        .route("/sections/:sectionId/teachers", get(section_teachers))
        .route("/sections/:sectionId/students", get(students_by_section))
        .route("/bulk-assign-teachers", post(bulk_assign))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new()
        .route("/info/:code", get(get_school))
        .route("/:schoolCode/structure", get(get_school_structure));

    Router::new()
        .nest("/api/v1/schools", public_routes.merge(protected_routes))
        .with_state(state)
}

// Schools

async fn create_school(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(req): JsonBody<CreateSchool>,
) -> Result<Created<School>> {
    schools::create_school_handler(&state, principal, req).await
}

async fn get_school(
    AxumState(state): AxumState<AppState>,
    PathParams(code): PathParams<String>,
) -> Result<Reply<SchoolDetail>> {
    schools::get_school_handler(&state, &code).await
}

async fn get_school_structure(
    AxumState(state): AxumState<AppState>,
    PathParams(code): PathParams<String>,
) -> Result<Reply<SchoolStructure>> {
    schools::get_school_structure_handler(&state, &code).await
}

// Sessions, classes and sections

async fn create_session(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
    JsonBody(req): JsonBody<CreateSession>,
) -> Result<Created<Session>> {
    structure::create_session_handler(&state, principal, &school_code, req).await
}

async fn sessions_by_school(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
) -> Result<Reply<Vec<Session>>> {
    structure::sessions_by_school_handler(&state, principal, &school_code).await
}

async fn create_class(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
    JsonBody(req): JsonBody<CreateClass>,
) -> Result<Created<Class>> {
    structure::create_class_handler(&state, principal, &school_code, req).await
}

async fn classes_by_school(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
) -> Result<Reply<Vec<ClassTree>>> {
    structure::classes_by_school_handler(&state, principal, &school_code).await
}

async fn create_section(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams((school_code, class_id)): PathParams<(String, Id)>,
    JsonBody(req): JsonBody<CreateSection>,
) -> Result<Created<Section>> {
    structure::create_section_handler(&state, principal, &school_code, class_id, req).await
}

async fn sections_by_class(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(class_id): PathParams<Id>,
) -> Result<Reply<Vec<SectionDetail>>> {
    structure::sections_by_class_handler(&state, principal, class_id).await
}

// Subjects and class catalogs

async fn create_subject(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
    JsonBody(req): JsonBody<CreateSubject>,
) -> Result<Created<Subject>> {
    subjects::create_subject_handler(&state, principal, &school_code, req).await
}

async fn subjects_by_school(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
    QueryParams(query): QueryParams<IncludeInactiveQuery>,
) -> Result<Reply<SubjectList>> {
    subjects::subjects_by_school_handler(&state, principal, &school_code, query.include_inactive).await
}

async fn update_subject(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(subject_id): PathParams<Id>,
    JsonBody(req): JsonBody<UpdateSubject>,
) -> Result<Reply<Subject>> {
    subjects::update_subject_handler(&state, principal, subject_id, req).await
}

async fn delete_subject(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(subject_id): PathParams<Id>,
    QueryParams(query): QueryParams<HardDeleteQuery>,
) -> Result<Reply<()>> {
    subjects::delete_subject_handler(&state, principal, subject_id, query.hard_delete).await
}

async fn assign_subjects(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(req): JsonBody<AssignSubjects>,
) -> Result<Reply<ClassWithSubjects>> {
    subjects::assign_subjects_handler(&state, principal, req).await
}

async fn remove_subject_from_class(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams((class_id, subject_id)): PathParams<(Id, Id)>,
) -> Result<Reply<()>> {
    subjects::remove_subject_from_class_handler(&state, principal, class_id, subject_id).await
}

async fn class_subjects(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(class_id): PathParams<Id>,
) -> Result<Reply<ClassSubjectsView>> {
    subjects::class_subjects_handler(&state, principal, class_id).await
}

// Teacher assignments

async fn assign_teacher(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(req): JsonBody<AssignTeacher>,
) -> Result<Created<AssignmentDetail>> {
    assignments::assign_teacher_handler(&state, principal, req).await
}

async fn update_assignment(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(assignment_id): PathParams<Id>,
    JsonBody(req): JsonBody<UpdateAssignment>,
) -> Result<Reply<AssignmentDetail>> {
    assignments::update_assignment_handler(&state, principal, assignment_id, req).await
}

async fn remove_assignment(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(assignment_id): PathParams<Id>,
    QueryParams(query): QueryParams<HardDeleteQuery>,
) -> Result<Reply<()>> {
    assignments::remove_assignment_handler(&state, principal, assignment_id, query.hard_delete).await
}

async fn bulk_assign(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    JsonBody(req): JsonBody<BulkAssignTeachers>,
) -> Result<Created<BulkAssignmentResult>> {
    assignments::bulk_assign_handler(&state, principal, req).await
}

async fn teacher_schedule(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(teacher_id): PathParams<Id>,
    QueryParams(scope): QueryParams<ScopeQuery>,
) -> Result<Reply<TeacherSchedule>> {
    assignments::teacher_schedule_handler(&state, principal, teacher_id, scope).await
}

async fn teachers_by_subject(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(subject_id): PathParams<Id>,
    QueryParams(scope): QueryParams<ScopeQuery>,
) -> Result<Reply<SubjectTeachers>> {
    assignments::teachers_by_subject_handler(&state, principal, subject_id, scope).await
}

async fn section_teachers(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(section_id): PathParams<Id>,
) -> Result<Reply<SectionTeachers>> {
    assignments::section_teachers_handler(&state, principal, section_id).await
}

async fn teaching_analytics(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
    QueryParams(query): QueryParams<SessionQuery>,
) -> Result<Reply<TeachingAnalytics>> {
    assignments::teaching_analytics_handler(&state, principal, &school_code, query.session_id).await
}

async fn available_teachers(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
    QueryParams(query): QueryParams<AvailableTeachersQuery>,
) -> Result<Reply<Vec<TeacherProfile>>> {
    assignments::available_teachers_handler(&state, principal, &school_code, query).await
}

async fn unassigned_combinations(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
) -> Result<Reply<UnassignedCombinations>> {
    assignments::unassigned_combinations_handler(&state, principal, &school_code).await
}

// Enrollments

async fn enroll_student(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(school_code): PathParams<String>,
    JsonBody(req): JsonBody<EnrollStudent>,
) -> Result<Created<EnrollmentDetail>> {
    enrollments::enroll_student_handler(&state, principal, &school_code, req).await
}

async fn students_by_section(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<Principal>,
    PathParams(section_id): PathParams<Id>,
    QueryParams(query): QueryParams<SessionQuery>,
) -> Result<Reply<Vec<SectionStudent>>> {
    enrollments::students_by_section_handler(&state, principal, section_id, query.session_id).await
}

// Health and fallback

async fn health_check(AxumState(state): AxumState<AppState>) -> Json<HealthResponse> {
    health::health_handler(&state).await
}

async fn route_not_found() -> AppError { AppError::not_found("Route not found") }

/// Creates the health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing the engines and JWT config
///
/// # Returns
///
/// Main router with health checks, API routes and request id tagging
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router(state.clone()))
        .merge(create_router(state))
        .fallback(route_not_found)
        .layer(middleware::from_fn(request_id_middleware))
}
