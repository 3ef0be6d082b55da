use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{person, report, resume};
use crate::state::AppState;

/// Largest accepted person submission, résumé included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cadastropessoa", get(person::registration))
        .route(
            "/salvarpessoa",
            post(person::save).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/listapessoas", get(person::listing))
        .route("/editarpessoa/{id}", get(person::edit))
        .route("/removerpessoa/{id}", get(person::remove))
        .route("/pessoaspag", get(person::search_by_name))
        .route(
            "/pesquisarpessoa",
            get(report::person_report).post(person::search),
        )
        .route("/baixarcurriculo/{id}", get(resume::download))
}
