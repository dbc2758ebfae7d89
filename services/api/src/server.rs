use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryAssignmentRepository, InMemoryCaseDirectory, InMemoryNotificationPublisher,
};
use crate::routes::with_case_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use case_flow::config::AppConfig;
use case_flow::error::AppError;
use case_flow::telemetry;
use case_flow::workflows::assignments::StepAssignmentService;
use case_flow::workflows::cases::RequirementCatalogSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let catalogs = Arc::new(RequirementCatalogSet::standard());
    let repository = Arc::new(InMemoryAssignmentRepository::default());
    let directory = Arc::new(InMemoryCaseDirectory::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let assignment_service = Arc::new(StepAssignmentService::new(
        repository,
        directory,
        notifications,
        catalogs.clone(),
    ));

    let app = with_case_routes(assignment_service, catalogs)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "case workflow service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
