//! # Campus Academics
//!
//! The consistency engine of the academic graph: schools, sessions, classes,
//! sections, subjects, teacher assignments and student enrollments.
//!
//! Every mutating operation follows the same path: validate the typed
//! command, resolve the referenced entities and their status, apply the rule
//! the operation owns, persist through [`AcademicStore`], and return a read
//! model from [`views`]. The engines receive the store and the
//! [`IdentityDirectory`] explicitly; nothing here holds global state.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use academics::{memory::MemoryStore, Academics, AcademicsConfig};
//!
//! let store = Arc::new(MemoryStore::new());
//! let academics = Academics::new(store.clone(), store, AcademicsConfig::default());
//! # let _ = academics;
//! ```

pub mod assignment;
pub mod commands;
pub mod config;
pub mod enrollment;
pub mod identity;
mod loader;
pub mod memory;
pub mod model;
pub mod store;
pub mod structure;
pub mod views;
pub mod workload;

use std::sync::Arc;

pub use assignment::AssignmentEngine;
pub use config::AcademicsConfig;
pub use enrollment::EnrollmentEngine;
pub use identity::{IdentityDirectory, Role, UserSummary};
pub use model::Id;
pub use store::AcademicStore;
pub use structure::StructureEngine;

/// The three engines wired to one store and directory.
#[derive(Clone)]
pub struct Academics {
    pub structure:   StructureEngine,
    pub assignments: AssignmentEngine,
    pub enrollments: EnrollmentEngine,
}

impl Academics {
    pub fn new(store: Arc<dyn AcademicStore>, directory: Arc<dyn IdentityDirectory>, config: AcademicsConfig) -> Self {
        Self {
            structure:   StructureEngine::new(store.clone(), directory.clone(), config.clone()),
            assignments: AssignmentEngine::new(store.clone(), directory.clone()),
            enrollments: EnrollmentEngine::new(store, directory, config),
        }
    }
}
