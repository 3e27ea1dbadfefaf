//! # Campus API Server
//!
//! Axum-based HTTP API over the academic engines.
//!
//! ## Modules
//!
//! - [`dto`]: Query-string types of the endpoints
//! - [`extract`]: Extractors that reject with the standard error envelope
//! - [`handlers`]: Role-gated request handlers
//! - [`middleware`]: Authentication and request id middleware
//! - [`router`]: API route configuration
//! - [`store`]: Database-backed store and identity directory

use std::sync::Arc;

use academics::{AcademicStore, Academics, AcademicsConfig, IdentityDirectory};
use auth::JwtConfig;

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod store;

pub use router::create_app_router;
use store::{SeaOrmDirectory, SeaOrmStore};

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// The academic engines
    pub academics:  Academics,
    /// Identity lookups for the authentication middleware
    pub directory:  Arc<dyn IdentityDirectory>,
    /// JWT configuration
    pub jwt_config: JwtConfig,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire the engines to an arbitrary store and directory.
    pub fn new(
        store: Arc<dyn AcademicStore>,
        directory: Arc<dyn IdentityDirectory>,
        jwt_config: JwtConfig,
        config: AcademicsConfig,
    ) -> Self {
        Self {
            academics: Academics::new(store, directory.clone(), config),
            directory,
            jwt_config,
            start_time: std::time::Instant::now(),
        }
    }

    /// Wire the engines to the database.
    pub fn with_database(db: sea_orm::DatabaseConnection, jwt_config: JwtConfig, config: AcademicsConfig) -> Self {
        Self::new(
            Arc::new(SeaOrmStore::new(db.clone())),
            Arc::new(SeaOrmDirectory::new(db)),
            jwt_config,
            config,
        )
    }
}
