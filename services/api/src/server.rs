use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_inspection_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use coating_advisor::config::AppConfig;
use coating_advisor::error::AppError;
use coating_advisor::telemetry;
use coating_advisor::workflows::inspection::{
    InspectionError, InspectionService, OpenAiChatClient,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.classifier.api_key.is_none() {
        warn!("no classifier API key configured; analysis and chat requests will fail");
    }
    let client = Arc::new(
        OpenAiChatClient::from_config(&config.classifier).map_err(InspectionError::from)?,
    );
    let inspection_service = Arc::new(InspectionService::new(client.clone(), client.clone()));

    let app = with_inspection_routes(inspection_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, model = client.model(), "coating advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
