use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct IndexInfo {
    pub application: &'static str,
    pub version: &'static str,
    /// Where the operator should go next.
    pub registration: &'static str,
    pub login: &'static str,
}

/// GET /
pub async fn index() -> Json<DataResponse<IndexInfo>> {
    Json(DataResponse {
        data: IndexInfo {
            application: "cadastro-pessoas",
            version: env!("CARGO_PKG_VERSION"),
            registration: "/cadastropessoa",
            login: "/login",
        },
    })
}
