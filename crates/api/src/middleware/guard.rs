//! Access policy evaluated once per request.
//!
//! | Route                               | Requirement               |
//! |-------------------------------------|---------------------------|
//! | `/`, `/login`, `/logout`, `/health` | none                      |
//! | `GET`/`HEAD /cadastropessoa`        | session with role `admin` |
//! | everything else                     | any session               |
//!
//! Requests without a session are redirected to `/login`; a session with the
//! wrong role gets 403.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use cadastro_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";

const PUBLIC_PATHS: &[&str] = &["/", LOGIN_PATH, "/logout", "/health"];

/// Outcome of the access policy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
    RedirectToLogin,
}

/// Decide whether `method path` may proceed for `session`.
pub fn guard(method: &Method, path: &str, session: Option<&AuthUser>) -> Access {
    if PUBLIC_PATHS.contains(&path) {
        return Access::Allow;
    }
    match session {
        None => Access::RedirectToLogin,
        Some(user)
            if matches!(*method, Method::GET | Method::HEAD)
                && path == "/cadastropessoa"
                && !user.is_admin() =>
        {
            Access::Deny
        }
        Some(_) => Access::Allow,
    }
}

/// Axum middleware applying [`guard`]; on success the session user is made
/// available to handlers through the request extensions.
pub async fn access_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let session = match AuthUser::from_session(req.headers(), &state).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    match guard(req.method(), req.uri().path(), session.as_ref()) {
        Access::Allow => {
            if let Some(user) = session {
                req.extensions_mut().insert(user);
            }
            next.run(req).await
        }
        Access::RedirectToLogin => {
            tracing::debug!(path = %req.uri().path(), "No session, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        Access::Deny => {
            tracing::info!(
                path = %req.uri().path(),
                user_id = session.as_ref().map(|u| u.user_id),
                "Access denied"
            );
            AppError::Core(CoreError::Forbidden("Admin role required".into())).into_response()
        }
    }
}
