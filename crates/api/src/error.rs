use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cadastro_core::error::CoreError;
use cadastro_db::StoreError;
use serde_json::json;

/// Error type returned by handlers.
///
/// Rendered as `{ "error": message, "code": CODE }`. Storage and internal
/// failures are logged and answered with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed multipart body, non-numeric id and the like.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body refused by an extractor for its size or content type.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// Convert an extractor rejection. Oversized bodies and unsupported
    /// content types keep their status, everything else is a 400.
    pub fn rejection(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                AppError::Rejected { status, message }
            }
            _ => AppError::BadRequest(message),
        }
    }

    /// Status, machine-readable code and client-facing message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Rejected { status, message } => {
                let code = if *status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "UNSUPPORTED_MEDIA_TYPE"
                };
                (*status, code, message.clone())
            }
            AppError::Store(StoreError::Database(err)) => classify_sqlx_error(err),
            AppError::Core(CoreError::Internal(_))
            | AppError::Store(StoreError::Constraint(_))
            | AppError::InternalError(_) => internal(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }
        (
            status,
            axum::Json(json!({
                "error": message,
                "code": code,
            })),
        )
            .into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// `RowNotFound` is 404, a unique violation on a `uq_*` constraint is 409,
/// anything else is 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint().filter(|c| c.starts_with("uq_")) {
                Some(constraint) => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                None => internal(),
            }
        }
        _ => internal(),
    }
}
