//! Integration tests for the shared studio session.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{
    body_json, delete, get, post_file, post_json, put_json, wait_for_status, ScriptedService,
    PNG_BYTES, TEST_MAX_IMAGE_BYTES,
};
use serde_json::json;
use svgsmith_core::service::{Contents, ServiceError};
use tokio::sync::Semaphore;

const SVG: &str = r#"<svg viewBox="0 0 10 10"><circle r="4"/></svg>"#;

async fn studio(app: &axum::Router) -> serde_json::Value {
    body_json(get(app.clone(), "/api/v1/studio").await).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Test: a new studio is idle with the default style
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_studio_is_idle() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));
    let snapshot = studio(&app).await;

    assert_eq!(snapshot["state"]["status"], "idle");
    assert_eq!(snapshot["style"], "flat");
    assert_eq!(snapshot["settings_visible"], false);
    assert_eq!(snapshot["is_loading"], false);
    assert!(snapshot["image"].is_null());
    assert_eq!(snapshot["settings"]["complexity"], "medium");
}

// ---------------------------------------------------------------------------
// Test: selections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn select_style_updates_settings_visibility() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));

    let response = put_json(app.clone(), "/api/v1/studio/style", json!({ "style": "line-art" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["style"], "line-art");
    assert_eq!(json["data"]["settings_visible"], true);
}

#[tokio::test]
async fn unknown_style_selection_is_rejected() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));

    let response =
        put_json(app.clone(), "/api/v1/studio/style", json!({ "style": "watercolor" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(studio(&app).await["style"], "flat");
}

#[tokio::test]
async fn partial_settings_fill_in_defaults() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));

    let response = put_json(
        app.clone(),
        "/api/v1/studio/settings",
        json!({ "complexity": "high", "line_cap": "square" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let settings = &body_json(response).await["data"]["settings"];
    assert_eq!(settings["complexity"], "high");
    assert_eq!(settings["line_cap"], "square");
    assert_eq!(settings["colors"], "full");
    assert_eq!(settings["stroke_weight"], "standard");
    assert_eq!(settings["line_fill"], "none");
}

// ---------------------------------------------------------------------------
// Test: image attachment couples with the trace style
// ---------------------------------------------------------------------------

#[tokio::test]
async fn attaching_image_switches_flat_to_trace_and_back() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));

    let response = post_file(app.clone(), "/api/v1/studio/image", "file", "image/png", PNG_BYTES).await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await["data"].clone();
    assert_eq!(snapshot["style"], "vector-trace");
    assert_eq!(snapshot["settings_visible"], true);
    assert_eq!(snapshot["image"]["mime_type"], "image/png");
    assert!(snapshot["image"]["preview_url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let response = delete(app.clone(), "/api/v1/studio/image").await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await["data"].clone();
    assert_eq!(snapshot["style"], "flat");
    assert!(snapshot["image"].is_null());
}

#[tokio::test]
async fn attaching_image_keeps_other_styles() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));
    put_json(app.clone(), "/api/v1/studio/style", json!({ "style": "cyberpunk" })).await;

    post_file(app.clone(), "/api/v1/studio/image", "file", "image/jpeg", PNG_BYTES).await;
    assert_eq!(studio(&app).await["style"], "cyberpunk");

    delete(app.clone(), "/api/v1/studio/image").await;
    assert_eq!(studio(&app).await["style"], "cyberpunk");
}

#[tokio::test]
async fn non_image_upload_is_ignored() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));

    let response =
        post_file(app.clone(), "/api/v1/studio/image", "file", "text/plain", b"hello").await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await["data"].clone();
    assert!(snapshot["image"].is_null());
    assert_eq!(snapshot["style"], "flat");
}

#[tokio::test]
async fn oversize_upload_is_rejected() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));
    let bytes = vec![0u8; TEST_MAX_IMAGE_BYTES + 100];

    let response = post_file(app.clone(), "/api/v1/studio/image", "file", "image/png", &bytes).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(studio(&app).await["image"].is_null());
}

#[tokio::test]
async fn oversize_non_image_upload_is_ignored() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));
    let bytes = vec![b'a'; TEST_MAX_IMAGE_BYTES + 100];

    let response =
        post_file(app.clone(), "/api/v1/studio/image", "file", "text/plain", &bytes).await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await["data"].clone();
    assert!(snapshot["image"].is_null());
    assert_eq!(snapshot["style"], "flat");
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = common::build_test_app(Arc::new(ScriptedService::empty()));

    let response =
        post_file(app.clone(), "/api/v1/studio/image", "avatar", "image/png", PNG_BYTES).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: submission guards leave the studio unchanged
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_submission_is_rejected_without_state_change() {
    let service = Arc::new(ScriptedService::empty());
    let app = common::build_test_app(Arc::clone(&service));

    let response = post_json(
        app.clone(),
        "/api/v1/studio/generate",
        json!({ "prompt": "   ", "style": "cyberpunk" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "EMPTY_SUBMISSION");

    let snapshot = studio(&app).await;
    assert_eq!(snapshot["state"]["status"], "idle");
    assert_eq!(snapshot["style"], "flat");
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn submission_while_loading_conflicts() {
    let gate = Arc::new(Semaphore::new(0));
    let service = Arc::new(ScriptedService::svg(SVG).gated(Arc::clone(&gate)));
    let app = common::build_test_app(Arc::clone(&service));

    let response = post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "a fox" })).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(response).await["data"]["token"], 1);

    let response = post_json(
        app.clone(),
        "/api/v1/studio/generate",
        json!({ "prompt": "a bear", "style": "blueprint" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "GENERATION_IN_PROGRESS");

    let snapshot = studio(&app).await;
    assert_eq!(snapshot["state"]["status"], "loading");
    assert_eq!(snapshot["state"]["token"], 1);
    assert_eq!(snapshot["is_loading"], true);
    assert_eq!(snapshot["style"], "flat");

    gate.add_permits(1);
    let snapshot = wait_for_status(&app, "success").await;
    assert_eq!(snapshot["state"]["artifact"]["prompt"], "a fox");
    assert_eq!(service.requests().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: accepted submissions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_generation_shows_artifact() {
    let service = Arc::new(ScriptedService::svg(SVG));
    let app = common::build_test_app(Arc::clone(&service));

    let response = post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "a fox" })).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let snapshot = wait_for_status(&app, "success").await;
    let artifact = &snapshot["state"]["artifact"];
    assert_eq!(artifact["svg"], SVG);
    assert_eq!(artifact["prompt"], "a fox");
    assert!(artifact["id"].is_string());
    assert_eq!(snapshot["is_loading"], false);
}

#[tokio::test]
async fn style_override_applies_on_accept() {
    let service = Arc::new(ScriptedService::svg(SVG));
    let app = common::build_test_app(Arc::clone(&service));

    post_json(
        app.clone(),
        "/api/v1/studio/generate",
        json!({ "prompt": "a castle", "style": "pixel-art" }),
    )
    .await;

    let snapshot = wait_for_status(&app, "success").await;
    assert_eq!(snapshot["style"], "pixel-art");

    let requests = service.requests();
    assert!((requests[0].config.temperature - 0.15).abs() < f32::EPSILON);
    assert!(requests[0].contents.text().contains("Pixel Art"));
}

#[tokio::test]
async fn service_failure_shows_categorized_error() {
    let service = Arc::new(ScriptedService::replying([Err(ServiceError::Api {
        status: 429,
        body: "RESOURCE_EXHAUSTED".into(),
    })]));
    let app = common::build_test_app(service);

    post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "a fox" })).await;

    let snapshot = wait_for_status(&app, "error").await;
    let error = &snapshot["state"]["error"];
    assert_eq!(error["category"], "overloaded");
    assert!(error["details"].as_str().unwrap().contains("429"));
    assert!(error["suggestion"].is_string());
}

#[tokio::test]
async fn reply_without_svg_is_format_error() {
    let service = Arc::new(ScriptedService::replying([Ok("I cannot draw that.".into())]));
    let app = common::build_test_app(service);

    post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "a fox" })).await;

    let snapshot = wait_for_status(&app, "error").await;
    assert_eq!(snapshot["state"]["error"]["category"], "format_error");
}

#[tokio::test]
async fn image_only_submission_sends_image_and_settings() {
    let service = Arc::new(ScriptedService::svg(SVG));
    let app = common::build_test_app(Arc::clone(&service));

    post_file(app.clone(), "/api/v1/studio/image", "file", "image/png", PNG_BYTES).await;
    put_json(
        app.clone(),
        "/api/v1/studio/settings",
        json!({ "complexity": "high" }),
    )
    .await;

    let response = post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "" })).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    wait_for_status(&app, "success").await;

    let requests = service.requests();
    assert_matches!(
        &requests[0].contents,
        Contents::WithImage { image, .. } if image.mime_type == "image/png"
    );
    assert!(requests[0].config.system_instruction.contains("Settings:"));
}

#[tokio::test]
async fn settings_are_not_sent_for_plain_styles() {
    let service = Arc::new(ScriptedService::svg(SVG));
    let app = common::build_test_app(Arc::clone(&service));

    put_json(
        app.clone(),
        "/api/v1/studio/settings",
        json!({ "complexity": "high" }),
    )
    .await;
    post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "a fox" })).await;
    wait_for_status(&app, "success").await;

    let requests = service.requests();
    assert!(!requests[0].config.system_instruction.contains("Settings:"));
}

#[tokio::test]
async fn resubmitting_after_success_clears_previous_artifact() {
    let gate = Arc::new(Semaphore::new(1));
    let service = Arc::new(
        ScriptedService::replying([Ok(SVG.to_string()), Ok(SVG.to_string())])
            .gated(Arc::clone(&gate)),
    );
    let app = common::build_test_app(service);

    post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "one" })).await;
    wait_for_status(&app, "success").await;

    let response = post_json(app.clone(), "/api/v1/studio/generate", json!({ "prompt": "two" })).await;
    assert_eq!(body_json(response).await["data"]["token"], 2);

    let snapshot = studio(&app).await;
    assert_eq!(snapshot["state"]["status"], "loading");
    assert!(snapshot["state"]["artifact"].is_null());

    gate.add_permits(1);
    let snapshot = wait_for_status(&app, "success").await;
    assert_eq!(snapshot["state"]["artifact"]["prompt"], "two");
}
