//! Login session model and DTOs.

use cadastro_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row of `user_sessions`.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub jti: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

impl UserSession {
    /// Not revoked and not yet expired at `now`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}

/// DTO for recording a newly issued session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub jti: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}
