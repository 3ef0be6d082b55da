use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;

use super::{attachment_disposition, AppQuery};
use crate::error::AppResult;
use crate::query::SearchParams;
use crate::state::AppState;

/// GET /**/pesquisarpessoa?nomepesquisa=&sexopesquisa=
///
/// Streams the PDF report of every matching person (exact sex match).
pub async fn person_report(
    State(state): State<AppState>,
    AppQuery(search): AppQuery<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let file = state.directory.report(&search.into()).await?;
    Ok((
        [
            (CONTENT_TYPE, file.content_type.to_string()),
            (CONTENT_DISPOSITION, attachment_disposition(file.file_name)),
        ],
        file.bytes,
    ))
}
