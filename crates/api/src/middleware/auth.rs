//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use cadastro_core::error::CoreError;
use cadastro_core::roles::ROLE_ADMIN;
use cadastro_core::types::DbId;
use serde::Serialize;

use crate::auth::jwt::{verify_session_token, Claims, JwtConfig};
use crate::auth::session::token_from_headers;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The user behind the current session.
///
/// The access guard stores it in the request extensions; the extractor falls
/// back to resolving the request headers when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    pub login: String,
    /// The user's role name (`"admin"` or `"user"`).
    pub role: String,
}

impl AuthUser {
    /// Resolve the session carried by `headers`.
    ///
    /// `None` when the token is missing or invalid, when its session was
    /// revoked or has expired, or when the account is deactivated. Login and
    /// role come from the account, not from the token.
    pub async fn from_session(headers: &HeaderMap, state: &AppState) -> AppResult<Option<Self>> {
        let Some(claims) = session_claims(headers, &state.config.jwt) else {
            return Ok(None);
        };
        let Some(user) = state.credentials.find_session_user(&claims.jti).await? else {
            tracing::debug!(jti = %claims.jti, "Session revoked or expired");
            return Ok(None);
        };
        if !user.is_active || user.id != claims.sub {
            tracing::debug!(user_id = user.id, "Session of inactive account rejected");
            return Ok(None);
        }
        Ok(Some(AuthUser {
            user_id: user.id,
            login: user.login,
            role: user.role,
        }))
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        AuthUser::from_session(&parts.headers, state)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or missing session".into()))
            })
    }
}

/// Claims of the validly signed, unexpired session token in `headers`.
pub fn session_claims(headers: &HeaderMap, config: &JwtConfig) -> Option<Claims> {
    let token = token_from_headers(headers)?;
    verify_session_token(token, config)
        .map_err(|e| tracing::debug!(error = %e, "Rejected session token"))
        .ok()
}
