//! Repository for the `user_sessions` table.

use sqlx::PgPool;

use super::user_repo::USER_COLUMNS;
use crate::models::session::{CreateSession, UserSession};
use crate::models::user::User;

const COLUMNS: &str = "jti, user_id, expires_at, is_revoked, created_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (jti, user_id, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(&input.jti)
            .bind(input.user_id)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// The account behind an unrevoked, unexpired session.
    pub async fn find_active_user(pool: &PgPool, jti: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} \
             FROM user_sessions s \
             JOIN users u ON u.id = s.user_id \
             JOIN roles r ON r.id = u.role_id \
             WHERE s.jti = $1 \
               AND s.is_revoked = false \
               AND s.expires_at > NOW()"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(jti)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if an active session was revoked.
    pub async fn revoke(pool: &PgPool, jti: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true WHERE jti = $1 AND is_revoked = false",
        )
        .bind(jti)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
