//! Login account model.

use cadastro_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A user joined with its role name.
///
/// Contains the password hash; never serialize it into responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub login: String,
    pub password_hash: String,
    /// Resolved role name (`"admin"` or `"user"`).
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
