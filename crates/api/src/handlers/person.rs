//! Handlers for person registration, listing and search.

use axum::extract::{Multipart, State};
use axum::Json;
use cadastro_core::job_level::JobLevel;
use cadastro_core::resume::{Resume, DEFAULT_CONTENT_TYPE};
use cadastro_core::types::DbId;
use cadastro_core::validation::PersonInput;

use super::{multipart_error, AppForm, AppMultipart, AppQuery, IdPath};
use crate::directory::{PersonView, SearchCriteria};
use crate::error::{AppError, AppResult};
use crate::query::{PageParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the résumé upload.
const RESUME_FIELD: &str = "curriculo";

/// Filename used when the upload does not declare one.
const FALLBACK_FILE_NAME: &str = "curriculo";

/// GET /cadastropessoa (admin only)
pub async fn registration(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<DataResponse<PersonView>>> {
    let view = state.directory.listing(&params.to_request()?).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /listapessoas
pub async fn listing(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<DataResponse<PersonView>>> {
    let view = state.directory.listing(&params.to_request()?).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /**/salvarpessoa
///
/// Multipart form with `id`, `nome`, `sexo`, `profissao`, `cargo` and an
/// optional file field `curriculo`. Validation failures come back as a 200
/// view with `errors` filled in.
pub async fn save(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<Json<DataResponse<PersonView>>> {
    let request = params.to_request()?;
    let (input, upload) = read_submission(multipart).await?;
    let view = state.directory.save(input, upload, &request).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /editarpessoa/{id}
pub async fn edit(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<DataResponse<PersonView>>> {
    let view = state.directory.edit(id, &params.to_request()?).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /removerpessoa/{id}
pub async fn remove(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<DataResponse<PersonView>>> {
    let view = state.directory.delete(id, &params.to_request()?).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /pessoaspag?nomepesquisa=&page=&size=&sort=
pub async fn search_by_name(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
    AppQuery(search): AppQuery<SearchParams>,
) -> AppResult<Json<DataResponse<PersonView>>> {
    let criteria = SearchCriteria::new(search.nomepesquisa, None);
    let view = state
        .directory
        .search(criteria, &params.to_request()?)
        .await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /**/pesquisarpessoa
///
/// Form fields `nomepesquisa` and `sexopesquisa`; pagination in the query string.
pub async fn search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
    AppForm(search): AppForm<SearchParams>,
) -> AppResult<Json<DataResponse<PersonView>>> {
    let view = state
        .directory
        .search(search.into(), &params.to_request()?)
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// Multipart decoding
// ---------------------------------------------------------------------------

/// Decode the person form. Unknown fields are ignored; an empty file part
/// counts as no upload.
async fn read_submission(mut multipart: Multipart) -> AppResult<(PersonInput, Option<Resume>)> {
    let mut input = PersonInput::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == RESUME_FIELD {
            let file_name = field
                .file_name()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(FALLBACK_FILE_NAME)
                .to_string();
            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(multipart_error)?;
            if !data.is_empty() {
                upload = Some(Resume {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(multipart_error)?;
        match name.as_str() {
            "id" => input.id = parse_id("id", &value)?,
            "nome" => input.name = value,
            "sexo" => input.sex = Some(value),
            "profissao" => input.profession_id = parse_id("profissao", &value)?,
            "cargo" => input.job_level = parse_job_level(&value)?,
            _ => {}
        }
    }

    Ok((input, upload))
}

/// Blank means absent; anything else must be an integer.
fn parse_id(field: &str, value: &str) -> AppResult<Option<DbId>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Field '{field}' must be numeric")))
}

fn parse_job_level(value: &str) -> AppResult<Option<JobLevel>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|e: cadastro_core::error::CoreError| AppError::BadRequest(e.to_string()))
}
