//! Report and résumé download endpoints.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_bytes, body_json, Part, TestContext};

#[tokio::test]
async fn report_is_streamed_as_pdf_attachment() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();
    ctx.post_multipart(
        "/salvarpessoa",
        &[Part::Text("nome", "Ana Silva"), Part::Text("sexo", "F")],
        Some(&token),
    )
    .await;

    let resp = ctx
        .get("/pesquisarpessoa?nomepesquisa=ana&sexopesquisa=f", Some(&token))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/pdf");
    assert_eq!(
        resp.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"relatorio.pdf\""
    );
    let bytes = body_bytes(resp).await;
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.windows(b"(Ana Silva)".len()).any(|w| w == b"(Ana Silva)"));
}

#[tokio::test]
async fn report_is_reachable_under_any_prefix() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();

    let resp = ctx
        .get("/telefones/3/pesquisarpessoa?nomepesquisa=", Some(&token))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/pdf");
}

#[tokio::test]
async fn resume_download_without_resume_is_no_content() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();
    let json = body_json(
        ctx.post_multipart("/salvarpessoa", &[Part::Text("nome", "Bia")], Some(&token))
            .await,
    )
    .await;
    let id = json["data"]["people"]["content"][0]["id"].as_i64().unwrap();

    let resp = ctx.get(&format!("/baixarcurriculo/{id}"), Some(&token)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ctx.get("/baixarcurriculo/999", Some(&token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resume_download_is_reachable_under_any_prefix() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();
    let json = body_json(
        ctx.post_multipart(
            "/salvarpessoa",
            &[
                Part::Text("nome", "Caio"),
                Part::File {
                    name: "curriculo",
                    file_name: "caio.txt",
                    content_type: "text/plain",
                    data: b"experiencia",
                },
            ],
            Some(&token),
        )
        .await,
    )
    .await;
    let id = json["data"]["people"]["content"][0]["id"].as_i64().unwrap();

    let resp = ctx
        .get(&format!("/editarpessoa/{id}/baixarcurriculo/{id}"), Some(&token))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/plain");
    assert_eq!(&body_bytes(resp).await[..], b"experiencia");
}
