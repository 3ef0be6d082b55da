//! HTTP-level tests for person registration, listing and search.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_bytes, body_json, page_names, Part, TestContext};

#[tokio::test]
async fn register_list_search_and_remove() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();
    let token = Some(token.as_str());

    let resp = ctx
        .post_multipart(
            "/salvarpessoa",
            &[Part::Text("nome", "Ana Silva"), Part::Text("sexo", "F")],
            token,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["errors"].as_array().unwrap().len(), 0);
    assert_eq!(page_names(&json), vec!["Ana Silva"]);
    let id = json["data"]["people"]["content"][0]["id"].as_i64().unwrap();

    let json = body_json(ctx.get("/listapessoas", token).await).await;
    assert_eq!(page_names(&json), vec!["Ana Silva"]);

    let resp = ctx
        .post_form("/pesquisarpessoa", "nomepesquisa=Ana&sexopesquisa=", token)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(page_names(&body_json(resp).await), vec!["Ana Silva"]);

    let resp = ctx
        .post_form("/pesquisarpessoa", "nomepesquisa=Bruno&sexopesquisa=", token)
        .await;
    let json = body_json(resp).await;
    assert!(page_names(&json).is_empty());
    assert_eq!(json["data"]["people"]["total_elements"], 0);

    let resp = ctx.get(&format!("/removerpessoa/{id}"), token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(page_names(&body_json(resp).await).is_empty());

    // Removing again is a no-op.
    let resp = ctx.get(&format!("/removerpessoa/{id}"), token).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn blank_name_returns_form_with_message() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();

    let resp = ctx
        .post_multipart(
            "/salvarpessoa",
            &[Part::Text("nome", "   "), Part::Text("sexo", "M")],
            Some(&token),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["errors"][0], "Nome não pode ser vazio");
    assert_eq!(json["data"]["person"]["sex"], "M");
    assert_eq!(json["data"]["people"]["total_elements"], 0);
}

#[tokio::test]
async fn save_is_reachable_under_any_prefix() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();

    let resp = ctx
        .post_multipart(
            "/editarpessoa/1/salvarpessoa",
            &[Part::Text("nome", "Carla")],
            Some(&token),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(page_names(&body_json(resp).await), vec!["Carla"]);
}

#[tokio::test]
async fn edit_prefills_form_and_keeps_resume() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();
    let token = Some(token.as_str());

    let json = body_json(
        ctx.post_multipart(
            "/salvarpessoa",
            &[
                Part::Text("nome", "Davi"),
                Part::Text("profissao", "1"),
                Part::Text("cargo", "SENIOR"),
                Part::File {
                    name: "curriculo",
                    file_name: "davi.pdf",
                    content_type: "application/pdf",
                    data: b"%PDF-fake",
                },
            ],
            token,
        )
        .await,
    )
    .await;
    let id = json["data"]["people"]["content"][0]["id"].as_i64().unwrap();

    let resp = ctx.get(&format!("/editarpessoa/{id}"), token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["person"]["id"], id);
    assert_eq!(json["data"]["person"]["name"], "Davi");
    assert_eq!(json["data"]["person"]["resume_file_name"], "davi.pdf");

    // Re-save without a file: the stored résumé is carried forward.
    let id_text = id.to_string();
    let resp = ctx
        .post_multipart(
            "/salvarpessoa",
            &[Part::Text("id", &id_text), Part::Text("nome", "Davi Souza")],
            token,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx.get(&format!("/baixarcurriculo/{id}"), token).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/pdf");
    assert_eq!(
        resp.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"davi.pdf\""
    );
    assert_eq!(&body_bytes(resp).await[..], b"%PDF-fake");
}

#[tokio::test]
async fn unknown_person_is_not_found() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();

    let resp = ctx.get("/editarpessoa/999", Some(&token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["code"], "NOT_FOUND");

    let resp = ctx
        .post_multipart(
            "/salvarpessoa",
            &[Part::Text("id", "999"), Part::Text("nome", "Ghost")],
            Some(&token),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();

    let resp = ctx.get("/editarpessoa/abc", Some(&token)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();

    let resp = ctx.get("/listapessoas?sort=salario", Some(&token)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn paged_name_search_reports_totals() {
    let ctx = TestContext::new().await;
    let token = ctx.user_token();
    let token = Some(token.as_str());

    for name in ["Ana", "Anabela", "Bruno", "Mariana"] {
        ctx.post_multipart("/salvarpessoa", &[Part::Text("nome", name)], token)
            .await;
    }

    let resp = ctx
        .get("/pessoaspag?nomepesquisa=ana&page=0&size=2&sort=nome", token)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(page_names(&json), vec!["Ana", "Anabela"]);
    assert_eq!(json["data"]["people"]["total_elements"], 3);
    assert_eq!(json["data"]["people"]["total_pages"], 2);

    let json = body_json(
        ctx.get("/pessoaspag?nomepesquisa=ana&page=1&size=2&sort=nome", token)
            .await,
    )
    .await;
    assert_eq!(page_names(&json), vec!["Mariana"]);
}
