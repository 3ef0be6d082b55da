#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Request, Response};
use cadastro_api::app::{build_app, App};
use cadastro_api::auth::jwt::JwtConfig;
use cadastro_api::auth::open_session;
use cadastro_api::config::{ServerConfig, StoreBackend};
use cadastro_api::state::AppState;
use cadastro_core::report::PdfReportGenerator;
use cadastro_core::roles::{ROLE_ADMIN, ROLE_USER};
use cadastro_db::{CredentialStore, MemoryStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

const BOUNDARY: &str = "cadastro-test-boundary";

/// Seeded admin and plain user. Their sessions are opened directly, so the
/// password hash is never checked.
pub const ADMIN_LOGIN: &str = "gestor";
pub const USER_LOGIN: &str = "operador";
const UNUSED_HASH: &str = "not-a-password-hash";

/// Build a test `ServerConfig` running against the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_mins: 60,
        },
        admin: None,
    }
}

/// Application state plus direct access to the store behind it.
pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    admin_token: String,
    user_token: String,
}

/// One part of a `multipart/form-data` body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

impl TestContext {
    /// Fresh in-memory store with an open session for each seeded account.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            test_config(),
            store.clone(),
            store.clone(),
            Arc::new(PdfReportGenerator),
        );
        let admin_token = seed_session(&store, &state.config.jwt, ADMIN_LOGIN, ROLE_ADMIN).await;
        let user_token = seed_session(&store, &state.config.jwt, USER_LOGIN, ROLE_USER).await;
        Self {
            state,
            store,
            admin_token,
            user_token,
        }
    }

    /// The full application with the production middleware stack.
    pub fn app(&self) -> App {
        build_app(self.state.clone())
    }

    pub fn admin_token(&self) -> String {
        self.admin_token.clone()
    }

    pub fn user_token(&self) -> String {
        self.user_token.clone()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let request = with_session(Request::get(uri), token)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, token: Option<&str>) -> Response<Body> {
        let request = with_session(Request::post(uri), token)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        parts: &[Part<'_>],
        token: Option<&str>,
    ) -> Response<Body> {
        let request = with_session(Request::post(uri), token)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }
}

async fn seed_session(store: &MemoryStore, jwt: &JwtConfig, login: &str, role: &str) -> String {
    store.ensure_user(login, UNUSED_HASH, role).await.unwrap();
    let user = store.find_user_by_login(login).await.unwrap().unwrap();
    open_session(store, &user, jwt).await.unwrap()
}

fn with_session(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(COOKIE, format!("SESSION={token}")),
        None => builder,
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Names of the persons in a person view's current page.
pub fn page_names(json: &serde_json::Value) -> Vec<String> {
    json["data"]["people"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}
