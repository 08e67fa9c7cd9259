use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::assistant::InspectionAssistant;
use super::classifier::DefectClassifier;
use super::domain::{FollowUpRequest, InspectionRequest};
use super::service::{InspectionError, InspectionService};

/// Router builder exposing the analysis and follow-up endpoints.
pub fn inspection_router<C, A>(service: Arc<InspectionService<C, A>>) -> Router
where
    C: DefectClassifier + 'static,
    A: InspectionAssistant + 'static,
{
    Router::new()
        .route("/api/v1/inspections/analyze", post(analyze_handler::<C, A>))
        .route("/api/v1/inspections/chat", post(chat_handler::<C, A>))
        .with_state(service)
}

pub(crate) async fn analyze_handler<C, A>(
    State(service): State<Arc<InspectionService<C, A>>>,
    payload: Result<Json<InspectionRequest>, JsonRejection>,
) -> Response
where
    C: DefectClassifier + 'static,
    A: InspectionAssistant + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match service.run(&request.images, request.meta).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn chat_handler<C, A>(
    State(service): State<Arc<InspectionService<C, A>>>,
    payload: Result<Json<FollowUpRequest>, JsonRejection>,
) -> Response
where
    C: DefectClassifier + 'static,
    A: InspectionAssistant + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match service.ask(request).await {
        Ok(answer) => (StatusCode::OK, Json(answer)).into_response(),
        Err(err) => error_response(err),
    }
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn error_response(err: InspectionError) -> Response {
    match err {
        InspectionError::InvalidInput(message) => bad_request(message),
        InspectionError::Upstream(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
