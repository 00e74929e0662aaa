//! HTTP-level integration tests for the editor and app configuration
//! endpoints.

mod common;

use aibuilder_core::editor::EditorConfig;
use axum::http::StatusCode;
use common::{
    body_json, body_text, get, get_with_session, header_str, post_json, post_json_with_session,
    put_json_with_session, spawn_app,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ---------------------------------------------------------------------------
// Session requirement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn editor_routes_require_session() {
    let app = spawn_app().await;

    let response = get(&app, "/api/v1/editor/defaults").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(&app, "/api/v1/editor/preview", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Defaults and devices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn defaults_match_new_app_configuration() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    let response = get_with_session(&app, "/api/v1/editor/defaults", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let config = &json["data"]["config"];
    assert_eq!(config["design"]["theme"], "LA");
    assert_eq!(config["credits"]["price"], 1.0);
    assert_eq!(config["more"]["temperature"], 0.8);
    assert_eq!(config["design"]["conversationStarters"], json!(["", "", "", ""]));

    let preview = &json["data"]["preview"];
    assert_eq!(preview["backgroundColor"], "#000000");
    assert_eq!(preview["appName"], "");
    assert_eq!(
        json["data"]["missingForPublish"],
        json!(["basic.aiName", "basic.aiDescription"])
    );
}

#[tokio::test]
async fn devices_list_mobile_as_default() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    let response = get_with_session(&app, "/api/v1/editor/devices?locale=en", &token).await;
    let json = body_json(response).await;
    let devices = json["data"].as_array().unwrap();

    assert_eq!(devices.len(), 3);
    let mobile = devices.iter().find(|d| d["key"] == "mobile").unwrap();
    assert_eq!(mobile["width"], 375);
    assert_eq!(mobile["height"], 812);
    assert_eq!(mobile["label"], "Mobile");
    assert_eq!(mobile["default"], true);
    assert_eq!(devices.iter().filter(|d| d["default"] == true).count(), 1);
}

// ---------------------------------------------------------------------------
// Section updates and edits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn section_patch_updates_projection() {
    let app = spawn_app().await;
    let token = app.login("7").await;
    let config = EditorConfig::default();

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/sections/design",
        json!({ "config": config, "patch": { "backgroundColor": "#111111" } }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["config"]["design"]["backgroundColor"], "#111111");
    assert_eq!(json["data"]["preview"]["backgroundColor"], "#111111");
    // Other sections are untouched.
    assert_eq!(json["data"]["config"]["credits"], json!(config.credits));
}

#[tokio::test]
async fn unknown_section_is_rejected() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/sections/billing",
        json!({ "patch": { "price": 3 } }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn out_of_range_section_patch_is_rejected() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    for (section, patch) in [
        ("credits", json!({ "price": -5, "chatsForPrice": 0 })),
        ("more", json!({ "temperature": 7.5 })),
        ("design", json!({ "opacityPercentage": 200 })),
        ("design", json!({ "backgroundColor": "nope" })),
    ] {
        let response = post_json_with_session(
            &app,
            &format!("/api/v1/editor/sections/{section}"),
            json!({ "config": EditorConfig::default(), "patch": patch }),
            &token,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{section}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn field_edit_changes_only_that_field() {
    let app = spawn_app().await;
    let token = app.login("7").await;
    let config = EditorConfig::default();

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/edit",
        json!({ "config": config, "section": "basic", "field": "aiName", "value": "JokeAI" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["preview"]["appName"], "JokeAI");

    let mut expected = config;
    expected.basic.ai_name = "JokeAI".into();
    let returned: EditorConfig = serde_json::from_value(json["data"]["config"].clone()).unwrap();
    assert_eq!(returned, expected);
}

#[tokio::test]
async fn invalid_price_input_coerces_to_zero() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/edit",
        json!({ "section": "credits", "field": "price", "value": "abc" }),
        &token,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["config"]["credits"]["price"], 0.0);
}

#[tokio::test]
async fn starter_slot_edit_keeps_four_slots() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/edit",
        json!({
            "section": "design",
            "field": "conversationStarters.2",
            "value": "Tell me a joke"
        }),
        &token,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["preview"]["conversationStarters"],
        json!(["", "", "Tell me a joke", ""])
    );
}

#[tokio::test]
async fn unknown_field_is_rejected() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/edit",
        json!({ "section": "basic", "field": "price", "value": "1" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn controls_mirror_current_values() {
    let app = spawn_app().await;
    let token = app.login("7").await;
    let mut config = EditorConfig::default();
    config.basic.ai_name = "JokeAI".into();

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/controls",
        json!({ "config": config, "section": "basic", "locale": "en" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let controls = json["data"].as_array().unwrap();
    let name = controls.iter().find(|c| c["name"] == "aiName").unwrap();
    assert_eq!(name["value"], "JokeAI");
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preview_returns_sandboxed_iframe_sized_for_device() {
    let app = spawn_app().await;
    let token = app.login("7").await;
    let mut config = EditorConfig::default();
    config.basic.ai_name = "JokeAI".into();

    let response = post_json_with_session(
        &app,
        "/api/v1/editor/preview",
        json!({ "config": config, "device": "tablet_portrait" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_str(&response, "content-type").unwrap().starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.starts_with("<iframe"));
    assert!(html.contains("sandbox=\"\""));
    assert!(html.contains("width=\"768\" height=\"1024\""));
    assert!(html.contains("JokeAI"));
}

// ---------------------------------------------------------------------------
// Apps
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_saved_app_config() {
    let app = spawn_app().await;
    let token = app.login("7").await;
    let mut saved = EditorConfig::default();
    saved.basic.ai_name = "Saved".into();

    Mock::given(method("GET"))
        .and(path("/api/v1/apps/app-1/config"))
        .and(header("x-user-id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&saved))
        .mount(&app.backend)
        .await;

    let response = get_with_session(&app, "/api/v1/apps/app-1/config", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["source"], "saved");
    assert_eq!(json["data"]["preview"]["appName"], "Saved");
}

#[tokio::test]
async fn load_falls_back_to_defaults_when_backend_fails() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/apps/app-1/config"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.backend)
        .await;

    let response = get_with_session(&app, "/api/v1/apps/app-1/config", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["source"], "defaults");
    assert_eq!(json["data"]["config"], json!(EditorConfig::default()));
}

#[tokio::test]
async fn load_missing_app_uses_defaults() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/apps/nope/config"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.backend)
        .await;

    let response = get_with_session(&app, "/api/v1/apps/nope/config", &token).await;
    assert_eq!(body_json(response).await["data"]["source"], "defaults");
}

#[tokio::test]
async fn create_app_returns_backend_id() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    Mock::given(method("POST"))
        .and(path("/api/v1/apps"))
        .and(header("x-user-id", "7"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "app-9" })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = post_json_with_session(
        &app,
        "/api/v1/apps",
        json!(EditorConfig::default()),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["id"], "app-9");
}

#[tokio::test]
async fn save_app_config_puts_to_backend() {
    let app = spawn_app().await;
    let token = app.login("7").await;
    let mut config = EditorConfig::default();
    config.basic.ai_name = "JokeAI".into();

    Mock::given(method("PUT"))
        .and(path("/api/v1/apps/app-1/config"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response =
        put_json_with_session(&app, "/api/v1/apps/app-1/config", json!(config), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["preview"]["appName"], "JokeAI");
}

#[tokio::test]
async fn save_rejects_invalid_config_without_calling_backend() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/apps/app-1/config"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = put_json_with_session(
        &app,
        "/api/v1/apps/app-1/config",
        json!({ "design": { "opacityPercentage": 150 } }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_backend_failure_is_502() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/apps/app-1/config"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&app.backend)
        .await;

    let response = put_json_with_session(
        &app,
        "/api/v1/apps/app-1/config",
        json!(EditorConfig::default()),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn save_unknown_app_is_404() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/apps/gone/config"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.backend)
        .await;

    let response = put_json_with_session(
        &app,
        "/api/v1/apps/gone/config",
        json!(EditorConfig::default()),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "App with id gone not found");
}

#[tokio::test]
async fn save_someone_elses_app_is_403() {
    let app = spawn_app().await;
    let token = app.login("7").await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/apps/app-2/config"))
        .and(header("x-user-id", "7"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&app.backend)
        .await;

    let response = put_json_with_session(
        &app,
        "/api/v1/apps/app-2/config",
        json!(EditorConfig::default()),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}
