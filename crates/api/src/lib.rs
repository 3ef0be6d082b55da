//! Person registry API server library.
//!
//! Exposes the building blocks (config, state, error handling, directory
//! service, routes) so integration tests and the binaries can share them.

pub mod app;
pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
