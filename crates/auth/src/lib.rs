//! # Authentication
//!
//! Bearer-token validation and role gates:
//! - JWT validation (HS256, issuer and audience checked)
//! - The authenticated [`Principal`] carried through a request
//! - Role gates used by handlers through `#[require_role(...)]`
//!
//! Tokens are issued by the identity system; this crate only verifies them.

pub mod jwt;
pub mod roles;

pub use academics::Role;
pub use jwt::{extract_bearer_token, validate_token, Claims, JwtConfig};
pub use roles::{ensure_role, Principal, ADMIN, STAFF_READER};

/// Convenience type alias for Result with AppError.
pub type Result<T> = error::Result<T>;
