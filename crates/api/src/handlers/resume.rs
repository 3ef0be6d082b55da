use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use cadastro_core::resume::DEFAULT_CONTENT_TYPE;

use super::{attachment_disposition, IdPath};
use crate::error::AppResult;
use crate::state::AppState;

/// GET /**/baixarcurriculo/{person_id}
///
/// 204 when the person has no résumé.
pub async fn download(
    State(state): State<AppState>,
    IdPath(person_id): IdPath,
) -> AppResult<Response> {
    let Some(resume) = state.directory.resume(person_id).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let content_type = HeaderValue::from_str(&resume.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let disposition = HeaderValue::from_str(&attachment_disposition(&resume.file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
        resume.data,
    )
        .into_response())
}
