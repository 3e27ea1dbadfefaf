//! # Common Test Utilities
//!
//! Shared test infrastructure: logging, token minting, a router over a seeded
//! in-memory store, and an in-memory SQLite database migrated with the real
//! schema.

#![allow(dead_code)]

use std::{
    sync::{Arc, Once},
    time::{SystemTime, UNIX_EPOCH},
};

use academics::{memory::MemoryStore, AcademicsConfig, Id, Role, UserSummary};
use auth::{Claims, JwtConfig};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::Engine as _;
use jsonwebtoken::{EncodingKey, Header};
use migration::{Migrator, MigratorTrait as _};
use sea_orm::{Database, DbConn};
use serde_json::Value;
use server::{create_app_router, AppState};
use tower::ServiceExt as _;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// Directory users. The school created first in a fresh store gets id 1.
pub const SCHOOL_ID: Id = 1;
pub const ADMIN: Id = 1;
pub const PRINCIPAL: Id = 2;
pub const TEACHER_1: Id = 11;
pub const TEACHER_2: Id = 12;
pub const STAFF: Id = 13;
pub const STUDENT_1: Id = 21;
pub const STUDENT_2: Id = 22;

pub fn user(id: Id, name: &str, role: Role) -> UserSummary {
    UserSummary {
        id,
        full_name: name.to_string(),
        email: format!("user{}@dps.edu.in", id),
        mobile_number: Some(format!("98765{:05}", id)),
        qualification: None,
        role,
        is_active: true,
        school_id: Some(SCHOOL_ID),
    }
}

pub fn directory_users() -> Vec<UserSummary> {
    vec![
        user(ADMIN, "Anil Admin", Role::Admin),
        user(PRINCIPAL, "Priya Principal", Role::Principal),
        user(TEACHER_1, "Asha Rao", Role::Teacher),
        user(TEACHER_2, "Bharat Singh", Role::Teacher),
        user(STAFF, "Suresh Staff", Role::Staff),
        user(STUDENT_1, "Kiran Student", Role::Student),
        user(STUDENT_2, "Meera Student", Role::Student),
    ]
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret:   base64::engine::general_purpose::STANDARD.encode("campus-test-secret-key-that-is-long-enough"),
        issuer:   "campus".to_string(),
        audience: "campus-api".to_string(),
    }
}

fn now() -> u64 { SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() }

/// Sign a token for `id` that expires `ttl` seconds from now (negative for
/// an already expired token).
pub fn token_with_ttl(id: Id, role: Role, ttl: i64) -> String {
    let config = jwt_config();
    let claims = Claims {
        sub: id.to_string(),
        role,
        school_id: Some(SCHOOL_ID),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: now().saturating_add_signed(ttl),
        iat: now(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_base64_secret(&config.secret).unwrap(),
    )
    .unwrap()
}

pub fn token(id: Id, role: Role) -> String { token_with_ttl(id, role, 3600) }

pub fn admin_token() -> String { token(ADMIN, Role::Admin) }

/// Response of a test request with the body parsed as JSON (`Null` when
/// empty or not JSON).
pub struct TestResponse {
    pub status:  StatusCode,
    pub headers: HeaderMap,
    pub body:    Value,
}

/// The full router over a [`MemoryStore`] seeded with [`directory_users`].
pub struct TestApp {
    pub store:  Arc<MemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self { Self::with_config(AcademicsConfig::default()).await }

    pub async fn with_config(config: AcademicsConfig) -> Self {
        init_test_env();
        let store = Arc::new(MemoryStore::new());
        for user in directory_users() {
            store.add_user(user).await;
        }
        let state = AppState::new(store.clone(), store.clone(), jwt_config(), config);
        Self {
            store,
            router: create_app_router(state),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => {
                builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap()
            },
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse { self.request(Method::GET, uri, Some(token), None).await }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }
}

/// A fresh in-memory SQLite database with every migration applied.
pub async fn migrated_sqlite() -> DbConn {
    init_test_env();
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
