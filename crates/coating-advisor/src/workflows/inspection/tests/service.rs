use serde_json::json;

use super::common::*;
use crate::workflows::inspection::{
    DefectType, EnvironmentCategory, FollowUpRequest, InspectionError, UpstreamError, DISCLAIMER,
};

#[tokio::test]
async fn run_rejects_empty_image_list_without_calling_classifier() {
    let (classifier, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );

    let result = service.run(&[], meta("Deck", None, None)).await;

    assert!(matches!(result, Err(InspectionError::InvalidInput(_))));
    assert!(classifier.calls().is_empty());
}

#[tokio::test]
async fn run_estimates_environment_from_location() {
    let (classifier, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );

    let report = service
        .run(&images(2), meta("Hull/Topside", Some("Porto di Genova"), None))
        .await
        .expect("report");

    assert_eq!(report.meta.estimated_env, EnvironmentCategory::C5M);
    assert_eq!(report.meta.effective_env, EnvironmentCategory::C5M);
    assert_eq!(report.items.len(), 2);
    assert_eq!(report.items[0].defect.kind, DefectType::Pitting);
    assert_eq!(report.disclaimer, DISCLAIMER);

    let calls = classifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, 2);
    assert_eq!(calls[0].1.area, "Hull/Topside");
    assert_eq!(calls[0].1.environment, EnvironmentCategory::C5M);
}

#[tokio::test]
async fn run_prefers_explicit_override_and_reports_both_environments() {
    let (classifier, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );

    let report = service
        .run(
            &images(2),
            meta("Ballast Tank", Some("Porto di Genova"), Some("C3")),
        )
        .await
        .expect("report");

    assert_eq!(report.meta.estimated_env, EnvironmentCategory::C5M);
    assert_eq!(report.meta.effective_env, EnvironmentCategory::C3);
    assert_eq!(classifier.calls()[0].1.environment, EnvironmentCategory::C3);
    assert_eq!(report.meta.input.environment.as_deref(), Some("C3"));
}

#[tokio::test]
async fn run_drops_caller_keys_that_shadow_computed_environments() {
    let (_, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );
    let mut request_meta = meta("Deck", Some("Porto di Genova"), None);
    request_meta
        .extra
        .insert("estimatedEnv".to_string(), json!("C3"));
    request_meta
        .extra
        .insert("effectiveEnv".to_string(), json!("C3"));
    request_meta
        .extra
        .insert("vessel".to_string(), json!("MV Aurora"));

    let report = service
        .run(&images(1), request_meta)
        .await
        .expect("report");

    assert!(!report.meta.input.extra.contains_key("estimatedEnv"));
    assert!(!report.meta.input.extra.contains_key("effectiveEnv"));

    let rendered = serde_json::to_string(&report.meta).expect("serializes");
    assert_eq!(rendered.matches("\"estimatedEnv\"").count(), 1);
    assert_eq!(rendered.matches("\"effectiveEnv\"").count(), 1);

    let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
    assert_eq!(value["estimatedEnv"], "C5M");
    assert_eq!(value["effectiveEnv"], "C5M");
    assert_eq!(value["vessel"], "MV Aurora");
}

#[tokio::test]
async fn run_rejects_unknown_override_before_classifying() {
    let (classifier, _, service) = build_service(
        ScriptedClassifier::returning(TWO_DEFECTS),
        CannedAssistant::default(),
    );

    let result = service
        .run(&images(1), meta("Deck", None, Some("marine-ish")))
        .await;

    assert!(matches!(result, Err(InspectionError::InvalidInput(_))));
    assert!(classifier.calls().is_empty());
}

#[tokio::test]
async fn run_surfaces_classifier_failure() {
    let (_, _, service) = build_service(FailingClassifier, CannedAssistant::default());

    match service.run(&images(1), meta("Deck", None, None)).await {
        Err(InspectionError::Upstream(UpstreamError::Status { status, .. })) => {
            assert_eq!(status, 503)
        }
        other => panic!("expected upstream failure, got {other:?}"),
    }
}

#[tokio::test]
async fn run_pads_items_when_classifier_returns_garbage() {
    let (_, _, service) = build_service(
        ScriptedClassifier::returning("no idea"),
        CannedAssistant::default(),
    );

    let report = service
        .run(&images(3), meta("Cargo Holds Dry", None, None))
        .await
        .expect("garbage output still produces a report");

    assert_eq!(report.meta.effective_env, EnvironmentCategory::C4);
    assert_eq!(report.items.len(), 3);
}

#[tokio::test]
async fn ask_requires_a_question() {
    let (_, assistant, service) = build_service(
        ScriptedClassifier::default(),
        CannedAssistant::default(),
    );

    let request = FollowUpRequest {
        question: Some("   ".to_string()),
        ..FollowUpRequest::default()
    };

    assert!(matches!(
        service.ask(request).await,
        Err(InspectionError::InvalidInput(_))
    ));
    assert!(assistant.questions().is_empty());
}

#[tokio::test]
async fn ask_forwards_meta_and_last_result_as_context() {
    let (_, assistant, service) = build_service(
        ScriptedClassifier::default(),
        CannedAssistant::default(),
    );

    let request = FollowUpRequest {
        question: Some(" Which overcoat interval applies? ".to_string()),
        meta: json!({ "area": "Deck" }),
        last_result: json!({ "items": [] }),
    };

    let answer = service.ask(request).await.expect("answer");
    assert!(answer.answer.contains("Which overcoat interval applies?"));

    let questions = assistant.questions();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].0, "Which overcoat interval applies?");
    assert_eq!(
        questions[0].1,
        json!({ "meta": { "area": "Deck" }, "lastResult": { "items": [] } })
    );
}

#[tokio::test]
async fn ask_surfaces_unconfigured_assistant() {
    let (_, _, service) = build_service(ScriptedClassifier::default(), UnconfiguredAssistant);

    let request = FollowUpRequest {
        question: Some("Is Sa 2½ required?".to_string()),
        ..FollowUpRequest::default()
    };

    assert!(matches!(
        service.ask(request).await,
        Err(InspectionError::Upstream(UpstreamError::NotConfigured))
    ));
}
