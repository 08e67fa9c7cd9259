use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use coating_advisor::error::AppError;
use coating_advisor::workflows::inspection::{
    estimate_environment, inspection_router, select_cycle, AreaFamily, CoatingCycle,
    DefectClassifier, DefectType, EnvironmentCategory, InspectionAssistant, InspectionError,
    InspectionService, AUTO_ENVIRONMENT, BASELINE_ENVIRONMENT,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EnvironmentQuery {
    #[serde(default)]
    pub(crate) location: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnvironmentEstimate {
    pub(crate) location: String,
    pub(crate) estimated_env: EnvironmentCategory,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CycleQuery {
    #[serde(default)]
    pub(crate) area: String,
    #[serde(default)]
    pub(crate) defect: Option<String>,
    #[serde(default)]
    pub(crate) environment: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CycleLookup {
    pub(crate) area: String,
    pub(crate) family: AreaFamily,
    pub(crate) defect: DefectType,
    pub(crate) environment: EnvironmentCategory,
    pub(crate) recommendation: CoatingCycle,
}

pub(crate) fn with_inspection_routes<C, A>(service: Arc<InspectionService<C, A>>) -> axum::Router
where
    C: DefectClassifier + 'static,
    A: InspectionAssistant + 'static,
{
    inspection_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/environment",
            axum::routing::get(environment_endpoint),
        )
        .route("/api/v1/cycles", axum::routing::get(cycle_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn environment_endpoint(
    Query(query): Query<EnvironmentQuery>,
) -> Json<EnvironmentEstimate> {
    let location = query.location.unwrap_or_default();
    let estimated_env = estimate_environment(&location);
    Json(EnvironmentEstimate {
        location,
        estimated_env,
    })
}

/// Direct decision-table lookup without a classifier round trip.
pub(crate) async fn cycle_endpoint(
    Query(query): Query<CycleQuery>,
) -> Result<Json<CycleLookup>, AppError> {
    let CycleQuery {
        area,
        defect,
        environment,
    } = query;

    let defect = match defect.as_deref().map(str::trim) {
        None | Some("") => DefectType::default(),
        Some(label) => DefectType::from_label(label).ok_or_else(|| {
            InspectionError::InvalidInput(format!("unknown defect type '{label}'"))
        })?,
    };

    let environment = match environment.as_deref().map(str::trim) {
        None | Some("") => BASELINE_ENVIRONMENT,
        Some(value) if value.eq_ignore_ascii_case(AUTO_ENVIRONMENT) => BASELINE_ENVIRONMENT,
        Some(value) => value
            .parse::<EnvironmentCategory>()
            .map_err(|err| InspectionError::InvalidInput(err.to_string()))?,
    };

    Ok(Json(CycleLookup {
        family: AreaFamily::classify(&area),
        recommendation: select_cycle(&area, defect, environment),
        area,
        defect,
        environment,
    }))
}
