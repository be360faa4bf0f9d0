
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn demo_mode_mutations_need_no_token() {
    let app = TestApp::spawn_demo().await;

    let response = app
        .client
        .post(app.url("/api/projects"))
        .json(&valid_project())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .client
        .delete(app.url(&format!("/api/projects/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn demo_mode_inbox_is_open() {
    let app = TestApp::spawn_demo().await;

    let response = app.client.get(app.url("/api/messages")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn demo_mode_still_validates_payloads() {
    let app = TestApp::spawn_demo().await;

    let response = app
        .client
        .post(app.url("/api/skills"))
        .json(&serde_json::json!({ "category": "Backend", "skills": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn demo_mode_health_reports_demo() {
    let app = TestApp::spawn_demo().await;

    let body: Value = app
        .client
        .get(app.url("/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["storage_mode"], "demo");
}
