use axum::routing::{get, post};
use axum::Router;

use crate::handlers::phone;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/telefones/{id}", get(phone::list))
        .route("/addfonepessoa/{id}", post(phone::add))
        .route("/removertelefone/{id}", get(phone::remove))
}
