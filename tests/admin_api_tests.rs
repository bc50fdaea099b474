//! Management API tests
//!
//! Bearer-token auth, owner scoping and the links/forms/stats endpoints.

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use leadlinker::api::jwt::{IdentityClaims, IdentityVerifier};
use leadlinker::api::{AppState, configure};
use leadlinker::config::StaticConfig;

use common::*;

const SECRET: &str = "test-secret-for-management-api";

fn token_for(owner: &str) -> String {
    let claims = IdentityClaims {
        sub: owner.to_string(),
        exp: chrono::Utc::now().timestamp() + 3600,
        iat: None,
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn bearer(owner: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(owner)))
}

macro_rules! init_app {
    ($storage:expr) => {{
        let mut config = StaticConfig::default();
        config.links.base_url = "https://go.test".to_string();
        let state = web::Data::new(AppState::new(&stores(&$storage), &config));
        let verifier = Some(Arc::new(IdentityVerifier::new(SECRET, None)));
        test::init_service(
            App::new().configure(|cfg| configure(cfg, state.clone(), verifier, &config.routes)),
        )
        .await
    }};
}

fn form_body() -> Value {
    json!({
        "name": "Webinar signup",
        "fields": [
            { "name": "email", "label": "Email", "type": "email", "required": true },
            { "name": "company", "label": "Company", "type": "short_text" }
        ]
    })
}

#[actix_rt::test]
async fn test_missing_or_invalid_token_is_unauthenticated() {
    let (storage, _dir) = test_storage().await;
    let app = init_app!(storage);

    let req = TestRequest::get().uri("/api/v1/links").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);

    let req = TestRequest::get()
        .uri("/api/v1/links")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_link_lifecycle() {
    let (storage, _dir) = test_storage().await;
    let app = init_app!(storage);

    // create
    let req = TestRequest::post()
        .uri("/api/v1/links")
        .insert_header(bearer(OWNER))
        .set_json(json!({ "destination": "https://example.com/landing", "code": "promo1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["code"], "promo1");
    assert_eq!(body["data"]["shortUrl"], "https://go.test/promo1");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // duplicate alias
    let req = TestRequest::post()
        .uri("/api/v1/links")
        .insert_header(bearer(OWNER))
        .set_json(json!({ "destination": "https://example.com/other", "customAlias": "promo1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1009);

    // update
    let req = TestRequest::put()
        .uri(&format!("/api/v1/links/{}", id))
        .insert_header(bearer(OWNER))
        .set_json(json!({ "title": "Spring promo", "isActive": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Spring promo");
    assert_eq!(body["data"]["isActive"], false);

    // list
    let req = TestRequest::get()
        .uri("/api/v1/links?page=1&pageSize=10")
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["id"], id.as_str());

    // delete
    let req = TestRequest::delete()
        .uri(&format!("/api/v1/links/{}", id))
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/links/{}", id))
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_invalid_destination_is_rejected() {
    let (storage, _dir) = test_storage().await;
    let app = init_app!(storage);

    let req = TestRequest::post()
        .uri("/api/v1/links")
        .insert_header(bearer(OWNER))
        .set_json(json!({ "destination": "javascript:alert(1)" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_other_owners_resources_are_not_found() {
    let (storage, _dir) = test_storage().await;
    let link = new_link(OTHER_OWNER, "theirs1", "https://example.com");
    leadlinker::storage::LinkStore::insert_link(storage.as_ref(), &link)
        .await
        .unwrap();
    let app = init_app!(storage);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/links/{}", link.id))
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/links/{}/stats", link.id))
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get()
        .uri("/api/v1/links")
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[actix_rt::test]
async fn test_form_crud_and_gated_link_stats() {
    let (storage, _dir) = test_storage().await;
    let app = init_app!(storage);

    let req = TestRequest::post()
        .uri("/api/v1/forms")
        .insert_header(bearer(OWNER))
        .set_json(form_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let form_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["fields"][0]["type"], "email");

    let req = TestRequest::post()
        .uri("/api/v1/links")
        .insert_header(bearer(OWNER))
        .set_json(json!({
            "destination": "https://example.com/webinar",
            "code": "webinar",
            "formId": form_id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let link_id = body["data"]["id"].as_str().unwrap().to_string();

    // 一次点击 + 一次提交
    let req = TestRequest::get().uri("/webinar").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let req = TestRequest::post()
        .uri("/submit/webinar")
        .set_json(json!({ "email": "lead@example.com", "company": "Acme" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/links/{}/stats", link_id))
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let stats = &body["data"];
    assert_eq!(stats["totalClicks"], 1);
    assert_eq!(stats["totalLeads"], 1);
    assert_eq!(stats["conversionRate"], 100.0);
    assert_eq!(stats["eventsByKind"]["click"], 1);
    assert_eq!(stats["eventsByKind"]["form_view"], 1);
    assert_eq!(stats["eventsByKind"]["form_submit"], 1);
    assert_eq!(stats["recentSubmissions"][0]["data"]["company"], "Acme");
    assert_eq!(stats["formFields"].as_array().unwrap().len(), 2);

    // 已有提交时不能删除字段
    let req = TestRequest::put()
        .uri(&format!("/api/v1/forms/{}", form_id))
        .insert_header(bearer(OWNER))
        .set_json(json!({
            "fields": [{ "name": "email", "label": "Email", "type": "email", "required": true }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 删除表单后链接直接跳转
    let req = TestRequest::delete()
        .uri(&format!("/api/v1/forms/{}", form_id))
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/webinar").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_rt::test]
async fn test_templates_and_form_listing() {
    let (storage, _dir) = test_storage().await;
    let app = init_app!(storage);

    let req = TestRequest::get()
        .uri("/api/v1/forms/templates")
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let templates = body["data"].as_array().unwrap();
    assert_eq!(templates.len(), 3);

    let req = TestRequest::get()
        .uri("/api/v1/forms")
        .insert_header(bearer(OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = TestRequest::post()
        .uri("/api/v1/forms")
        .insert_header(bearer(OWNER))
        .set_json(json!({ "name": "Empty", "fields": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
