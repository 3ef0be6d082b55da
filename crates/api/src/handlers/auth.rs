//! Handlers for the session lifecycle (login form, login, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use cadastro_core::error::CoreError;
use serde::{Deserialize, Serialize};

use super::AppForm;
use crate::auth::open_session;
use crate::auth::password::verify_password;
use crate::auth::session::{expired_session_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{session_claims, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Descriptor of the login form plus the current session, if any.
#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub action: &'static str,
    pub fields: [&'static str; 2],
    pub session: Option<AuthUser>,
}

/// Successful login payload. The token is also set as the session cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: AuthUser,
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<DataResponse<LoginPage>>> {
    Ok(Json(DataResponse {
        data: LoginPage {
            action: "/login",
            fields: ["username", "password"],
            session: AuthUser::from_session(&headers, &state).await?,
        },
    }))
}

/// POST /login
///
/// Verifies the credentials and opens a session. Unknown login or wrong
/// password is 401; a deactivated account is 403.
pub async fn login(
    State(state): State<AppState>,
    AppForm(form): AppForm<LoginForm>,
) -> AppResult<impl IntoResponse> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = state
        .credentials
        .find_user_by_login(form.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&form.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(login = %user.login, "Failed login attempt");
        return Err(invalid());
    }

    let jwt = &state.config.jwt;
    let token = open_session(state.credentials.as_ref(), &user, jwt).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let body = LoginResponse {
        access_token: token.clone(),
        expires_in: jwt.session_expiry_secs(),
        user: AuthUser {
            user_id: user.id,
            login: user.login,
            role: user.role,
        },
    };
    Ok((
        [(SET_COOKIE, session_cookie(&token, jwt.session_expiry_secs()))],
        Json(DataResponse { data: body }),
    ))
}

/// POST /logout
///
/// Revokes the current session, if any, and clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    if let Some(claims) = session_claims(&headers, &state.config.jwt) {
        if state.credentials.revoke_session(&claims.jti).await? {
            tracing::info!(user_id = claims.sub, "User logged out");
        }
    }
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, expired_session_cookie())],
    ))
}
