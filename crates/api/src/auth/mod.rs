//! Authentication primitives for the auth gate.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`session`] -- session cookie encoding and token lookup in headers.

pub mod jwt;
pub mod password;
pub mod session;

use cadastro_core::roles::ROLE_ADMIN;
use cadastro_db::models::session::CreateSession;
use cadastro_db::models::user::User;
use cadastro_db::CredentialStore;
use chrono::DateTime;

use crate::error::{AppError, AppResult};

/// Create the administrator account unless its login already exists.
///
/// Returns true when a new account was created.
pub async fn bootstrap_admin(
    credentials: &dyn CredentialStore,
    login: &str,
    password: &str,
) -> AppResult<bool> {
    password::validate_password_strength(password, password::MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;
    let hash = password::hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    Ok(credentials.ensure_user(login, &hash, ROLE_ADMIN).await?)
}

/// Issue a session token for `user` and record the session under its `jti`.
pub async fn open_session(
    credentials: &dyn CredentialStore,
    user: &User,
    config: &jwt::JwtConfig,
) -> AppResult<String> {
    let issued = jwt::issue_session_token(user.id, &user.login, &user.role, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let expires_at = DateTime::from_timestamp(issued.claims.exp, 0)
        .ok_or_else(|| AppError::InternalError("Session expiry out of range".into()))?;

    credentials
        .create_session(&CreateSession {
            jti: issued.claims.jti,
            user_id: user.id,
            expires_at,
        })
        .await?;
    Ok(issued.token)
}
