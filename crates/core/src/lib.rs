//! Domain logic for the person registry.
//!
//! Zero-IO building blocks shared by the persistence layer and the HTTP
//! server: error type, id types, roles, search and pagination, validation and
//! report generation.

pub mod error;
pub mod job_level;
pub mod report;
pub mod resume;
pub mod roles;
pub mod search;
pub mod types;
pub mod validation;
