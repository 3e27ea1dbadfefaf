//! # Data Transfer Objects Module
//!
//! Query-string and health types of the API endpoints.

pub mod queries;
