use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::inspection::inspection_router;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn analyze_returns_report_and_echoes_extra_meta() {
    let (_, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );
    let router = inspection_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/inspections/analyze",
            json!({
                "images": ["data:image/png;base64,AAAA", "data:image/png;base64,BBBB"],
                "meta": {
                    "area": "Deck",
                    "environment": "Auto",
                    "location": "Marina di Ravenna",
                    "vessel": "MV Aurora"
                }
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["meta"]["vessel"], "MV Aurora");
    assert_eq!(body["meta"]["estimatedEnv"], "C5M");
    assert_eq!(body["meta"]["effectiveEnv"], "C5M");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["items"][0]["defect"]["type"], "pitting");
    assert_eq!(body["items"][0]["source"], "classifier");
    assert!(body["items"][0]["recommendation"]["surfacePrep"].is_string());
    assert!(body["disclaimer"].is_string());
    assert!(body["generatedAt"].is_string());
}

#[tokio::test]
async fn analyze_without_images_is_bad_request() {
    let (_, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );
    let router = inspection_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/inspections/analyze",
            json!({ "images": "not-a-list", "meta": { "area": "Deck" } }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn analyze_with_malformed_json_is_bad_request() {
    let (_, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );
    let router = inspection_router(Arc::new(service));

    let request = Request::post("/api/v1/inspections/analyze")
        .header("content-type", "application/json")
        .body(Body::from("{\"images\": ["))
        .expect("request");
    let response = router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_reports_upstream_failure_as_internal_error() {
    let (_, _, service) = build_service(FailingClassifier, CannedAssistant::default());
    let router = inspection_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/inspections/analyze",
            json!({ "images": ["data:image/png;base64,AAAA"], "meta": { "area": "Deck" } }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("503")));
}

#[tokio::test]
async fn chat_answers_question() {
    let (_, _, service) = build_service(
        ScriptedClassifier::default(),
        CannedAssistant::default(),
    );
    let router = inspection_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/inspections/chat",
            json!({
                "question": "Minimum overcoat time at 10°C?",
                "meta": { "area": "Deck" },
                "lastResult": { "items": [] }
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert!(body["answer"]
        .as_str()
        .is_some_and(|answer| answer.contains("overcoat")));
}

#[tokio::test]
async fn chat_without_question_is_bad_request() {
    let (_, _, service) = build_service(
        ScriptedClassifier::default(),
        CannedAssistant::default(),
    );
    let router = inspection_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/api/v1/inspections/chat", json!({ "meta": {} })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "missing question");
}

#[tokio::test]
async fn analyze_accepts_null_meta_and_null_area() {
    let (classifier, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );
    let router = inspection_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/inspections/analyze",
            json!({ "images": ["data:image/png;base64,AAAA"], "meta": null }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["meta"]["effectiveEnv"], "C4");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));

    let response = router
        .oneshot(post_json(
            "/api/v1/inspections/analyze",
            json!({
                "images": ["data:image/png;base64,AAAA"],
                "meta": { "area": null, "location": "Porto di Napoli" }
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["meta"]["area"], "");
    assert_eq!(body["meta"]["effectiveEnv"], "C5M");

    assert_eq!(classifier.calls().len(), 2);
}
