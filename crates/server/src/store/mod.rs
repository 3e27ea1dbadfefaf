//! # Database Store
//!
//! [`academics::AcademicStore`] and [`academics::IdentityDirectory`] over the
//! schema created by the `migration` crate.

mod academic;
mod convert;
mod directory;

pub use academic::SeaOrmStore;
pub use directory::SeaOrmDirectory;
