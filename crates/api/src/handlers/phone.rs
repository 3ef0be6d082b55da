//! Handlers for the phones of a person.

use axum::extract::State;
use axum::Json;
use cadastro_core::validation::PhoneInput;
use serde::Deserialize;

use super::{AppForm, IdPath};
use crate::directory::PhoneView;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Form body for `POST /**/addfonepessoa/{id}`. Missing fields count as empty.
#[derive(Debug, Default, Deserialize)]
pub struct PhoneForm {
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub tipo: String,
}

/// GET /telefones/{person_id}
pub async fn list(
    State(state): State<AppState>,
    IdPath(person_id): IdPath,
) -> AppResult<Json<DataResponse<PhoneView>>> {
    let view = state.directory.phones(person_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /**/addfonepessoa/{person_id}
pub async fn add(
    State(state): State<AppState>,
    IdPath(person_id): IdPath,
    AppForm(form): AppForm<PhoneForm>,
) -> AppResult<Json<DataResponse<PhoneView>>> {
    let input = PhoneInput::new(form.numero, form.tipo);
    let view = state.directory.add_phone(person_id, input).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /removertelefone/{phone_id}
pub async fn remove(
    State(state): State<AppState>,
    IdPath(phone_id): IdPath,
) -> AppResult<Json<DataResponse<PhoneView>>> {
    let view = state.directory.remove_phone(phone_id).await?;
    Ok(Json(DataResponse { data: view }))
}
