//! Authentication middleware and extractors.
//!
//! - [`guard::access_guard`] -- per-request access policy (public, session, admin).
//! - [`auth::AuthUser`] -- the authenticated user, for handlers that need it.

pub mod auth;
pub mod guard;
