pub mod auth;
pub mod person;
pub mod phone;
pub mod rewrite;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// GET  /                                  index (public)
/// GET  /health                            health (public)
/// GET  /login, POST /login, POST /logout  session lifecycle (public)
///
/// GET  /cadastropessoa                    registration view (admin only)
/// POST /salvarpessoa                      create / update (multipart)
/// GET  /listapessoas                      listing
/// GET  /editarpessoa/{id}                 edit form
/// GET  /removerpessoa/{id}                delete
/// GET  /pessoaspag                        name search, paginated
/// POST /pesquisarpessoa                   filtered search, paginated
/// GET  /pesquisarpessoa                   filtered search as PDF
/// GET  /baixarcurriculo/{id}              résumé download
///
/// GET  /telefones/{id}                    phones of a person
/// POST /addfonepessoa/{id}                add phone
/// GET  /removertelefone/{id}              remove phone
/// ```
///
/// Routes marked `/**/` in the public interface are reached through
/// [`rewrite::collapse_prefix`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/health", get(handlers::health::health_check))
        .merge(auth::router())
        .merge(person::router())
        .merge(phone::router())
}
