//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// User columns with the role name resolved; expects `users u JOIN roles r`.
pub(crate) const USER_COLUMNS: &str =
    "u.id, u.login, u.password_hash, r.name AS role, u.is_active, u.created_at, u.updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Find a user by login (case-sensitive), with its role name resolved.
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} \
             FROM users u \
             JOIN roles r ON r.id = u.role_id \
             WHERE u.login = $1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user unless the login is already taken.
    ///
    /// Returns true when a row was created. An unknown role inserts nothing.
    pub async fn ensure(
        pool: &PgPool,
        login: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (login, password_hash, role_id) \
             SELECT $1, $2, r.id FROM roles r WHERE r.name = $3 \
             ON CONFLICT (login) DO NOTHING",
        )
        .bind(login)
        .bind(password_hash)
        .bind(role)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
