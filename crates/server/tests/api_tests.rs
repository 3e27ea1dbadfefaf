//! # API Tests
//!
//! Requests against the full router over the in-memory store: the auth
//! middleware, role gates, the response envelope and the academic rules as
//! seen over HTTP.

mod common;

use academics::Role;
use axum::http::{Method, StatusCode};
use common::*;
use serde_json::{json, Value};

/// Ids of the entities created by [`seed_school`].
struct Seeded {
    session: i64,
    class:   i64,
    section: i64,
    math:    i64,
}

fn id(body: &Value) -> i64 { body["data"]["id"].as_i64().unwrap() }

/// DPS001 with one active session, Class 1 / A and Mathematics in the class
/// catalog.
async fn seed_school(app: &TestApp) -> Seeded {
    let admin = admin_token();

    let res = app
        .post("/api/v1/schools/create", &admin, json!({
            "code": "DPS001",
            "name": "Delhi Public School",
            "establishedYear": 1972
        }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "School created successfully");

    let res = app
        .post("/api/v1/schools/DPS001/sessions", &admin, json!({
            "name": "2025-26",
            "startDate": "2025-04-01",
            "endDate": "2026-03-31",
            "isActive": true
        }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let session = id(&res.body);

    let res = app
        .post("/api/v1/schools/DPS001/classes", &admin, json!({ "name": "Class 1", "level": 1 }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let class = id(&res.body);

    let res = app
        .post(
            &format!("/api/v1/schools/DPS001/classes/{}/sections", class),
            &admin,
            json!({ "name": "A", "room": "Room 101", "classTeacherId": TEACHER_1 }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let section = id(&res.body);

    let res = app
        .post("/api/v1/schools/DPS001/subjects", &admin, json!({ "name": "Mathematics", "code": "MATH" }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let math = id(&res.body);

    let res = app
        .post("/api/v1/schools/classes/assign-subjects", &admin, json!({
            "classId": class,
            "subjectIds": [math]
        }))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    Seeded {
        session,
        class,
        section,
        math,
    }
}

#[tokio::test]
async fn test_health_is_public_and_tagged_with_request_id() {
    let app = TestApp::new().await;

    let res = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert!(res.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let res = app
        .request(Method::GET, "/api/v1/schools/DPS001/sessions", None, None)
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["code"], "AUTHENTICATION_ERROR");
    assert_eq!(res.body["message"], "Missing authorization header");
    assert_eq!(res.headers["www-authenticate"], "Bearer");
}

#[tokio::test]
async fn test_expired_and_forged_tokens_are_unauthorized() {
    let app = TestApp::new().await;

    let expired = token_with_ttl(ADMIN, Role::Admin, -3600);
    let res = app.get("/api/v1/schools/DPS001/sessions", &expired).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Token has expired");

    let res = app.get("/api/v1/schools/DPS001/sessions", "not-a-jwt").await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Invalid token");
}

#[tokio::test]
async fn test_deactivated_account_is_forbidden() {
    let app = TestApp::new().await;
    seed_school(&app).await;
    app.store.set_user_active(TEACHER_2, false).await;

    let res = app
        .get("/api/v1/schools/DPS001/classes", &token(TEACHER_2, Role::Teacher))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["message"], "Account is deactivated. Please contact an administrator.");

    let res = app.get("/api/v1/schools/DPS001/classes", &token(TEACHER_1, Role::Teacher)).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_role_gates() {
    let app = TestApp::new().await;
    seed_school(&app).await;

    let res = app
        .post("/api/v1/schools/create", &token(TEACHER_1, Role::Teacher), json!({
            "code": "DPS002",
            "name": "Second School"
        }))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["code"], "FORBIDDEN");
    assert_eq!(res.body["message"], "Access denied");

    // Non-teaching staff and students cannot read the structure.
    for (user, role) in [(STAFF, Role::Staff), (STUDENT_1, Role::Student)] {
        let res = app.get("/api/v1/schools/DPS001/subjects", &token(user, role)).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN);
    }

    let res = app
        .get("/api/v1/schools/DPS001/subjects", &token(PRINCIPAL, Role::Principal))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["count"], 1);
}

#[tokio::test]
async fn test_public_school_views() {
    let app = TestApp::new().await;
    let seeded = seed_school(&app).await;

    let res = app.request(Method::GET, "/api/v1/schools/info/DPS001", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["code"], "DPS001");
    assert_eq!(res.body["data"]["sessions"][0]["id"], seeded.session);

    let res = app
        .request(Method::GET, "/api/v1/schools/DPS001/structure", None, None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let data = &res.body["data"];
    assert_eq!(data["activeSession"]["name"], "2025-26");
    assert_eq!(data["classes"][0]["id"], seeded.class);
    assert_eq!(data["classes"][0]["sections"][0]["id"], seeded.section);
    assert_eq!(data["classes"][0]["sections"][0]["classTeacher"]["id"], TEACHER_1);

    let res = app.request(Method::GET, "/api/v1/schools/info/NOPE", None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "School not found");
}

#[tokio::test]
async fn test_duplicate_school_code_conflicts() {
    let app = TestApp::new().await;
    seed_school(&app).await;

    let res = app
        .post("/api/v1/schools/create", &admin_token(), json!({ "code": "DPS001", "name": "Copy" }))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["message"], "School with this code already exists");
}

#[tokio::test]
async fn test_teacher_assignment_over_http() {
    let app = TestApp::new().await;
    let seeded = seed_school(&app).await;
    let admin = admin_token();

    let res = app
        .post("/api/v1/schools/assign-teacher-subject", &admin, json!({
            "sectionId": seeded.section,
            "subjectId": seeded.math,
            "teacherId": TEACHER_1
        }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "Teacher assigned to section-subject successfully");
    assert_eq!(res.body["data"]["teacherId"], TEACHER_1);
    assert_eq!(res.body["data"]["section"]["class"]["name"], "Class 1");

    let res = app
        .post("/api/v1/schools/assign-teacher-subject", &admin, json!({
            "sectionId": seeded.section,
            "subjectId": seeded.math,
            "teacherId": TEACHER_2
        }))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], "CONFLICT");
    assert_eq!(res.body["data"]["currentTeacherId"], TEACHER_1);

    let res = app
        .get(&format!("/api/v1/schools/sections/{}/teachers", seeded.section), &admin)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["subjectTeachers"][0]["teacher"]["id"], TEACHER_1);

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/schools/classes/{}/subjects/{}", seeded.class, seeded.math),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["message"], "Cannot remove subject. It has active teacher assignments.");
    assert_eq!(res.body["data"]["activeAssignments"], 1);
}

#[tokio::test]
async fn test_subject_outside_catalog_is_invalid_state() {
    let app = TestApp::new().await;
    let seeded = seed_school(&app).await;
    let admin = admin_token();

    let res = app
        .post("/api/v1/schools/DPS001/subjects", &admin, json!({ "name": "Art", "code": "ART" }))
        .await;
    let art = id(&res.body);

    let res = app
        .post("/api/v1/schools/assign-teacher-subject", &admin, json!({
            "sectionId": seeded.section,
            "subjectId": art,
            "teacherId": TEACHER_1
        }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "INVALID_STATE");
    assert_eq!(res.body["message"], "Subject is not assigned to this class");
}

#[tokio::test]
async fn test_enrollment_over_http() {
    let app = TestApp::new().await;
    let seeded = seed_school(&app).await;
    let admin = admin_token();

    let enroll = |student: i32, roll: &str| {
        json!({
            "studentId": student,
            "sessionId": seeded.session,
            "classId": seeded.class,
            "sectionId": seeded.section,
            "rollNumber": roll
        })
    };

    let res = app
        .post("/api/v1/schools/DPS001/enrollments", &admin, enroll(STUDENT_1, "5"))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "Student enrolled successfully");
    assert_eq!(res.body["data"]["status"], "active");

    let res = app
        .post("/api/v1/schools/DPS001/enrollments", &admin, enroll(STUDENT_2, "5"))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["message"], "Roll number already taken in this section for this session");

    let res = app
        .post("/api/v1/schools/DPS001/enrollments", &admin, enroll(STUDENT_2, "10"))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = app
        .get(&format!("/api/v1/schools/sections/{}/students", seeded.section), &admin)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let rolls: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rollNumber"].as_str().unwrap())
        .collect();
    assert_eq!(rolls, vec!["10", "5"]);
}

#[tokio::test]
async fn test_subject_soft_delete_and_include_inactive() {
    let app = TestApp::new().await;
    seed_school(&app).await;
    let admin = admin_token();

    let res = app
        .post("/api/v1/schools/DPS001/subjects", &admin, json!({ "name": "Art", "code": "ART" }))
        .await;
    let art = id(&res.body);

    let res = app
        .request(Method::DELETE, &format!("/api/v1/schools/subjects/{}", art), Some(&admin), None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Subject deactivated successfully");

    let res = app.get("/api/v1/schools/DPS001/subjects", &admin).await;
    assert_eq!(res.body["data"]["count"], 1);

    let res = app
        .get("/api/v1/schools/DPS001/subjects?includeInactive=true", &admin)
        .await;
    assert_eq!(res.body["data"]["count"], 2);

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/schools/subjects/{}?hardDelete=true", art),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Subject deleted permanently");

    let res = app
        .get("/api/v1/schools/DPS001/subjects?includeInactive=true", &admin)
        .await;
    assert_eq!(res.body["data"]["count"], 1);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_requests() {
    let app = TestApp::new().await;
    seed_school(&app).await;
    let admin = admin_token();

    let res = app
        .post("/api/v1/schools/DPS001/sessions", &admin, json!({
            "name": "2026-27",
            "endDate": "2027-03-31"
        }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "BAD_REQUEST");
    assert_eq!(res.body["message"], "Missing required field: startDate");

    let res = app.get("/api/v1/schools/classes/abc/sections", &admin).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "BAD_REQUEST");

    let res = app
        .post("/api/v1/schools/bulk-assign-teachers", &admin, json!({}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let res = app
        .post("/api/v1/schools/create", &admin, json!({ "code": "X1", "name": "X", "email": "nope" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;

    let res = app.request(Method::GET, "/api/v2/anything", None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(res.body["message"], "Route not found");
}
