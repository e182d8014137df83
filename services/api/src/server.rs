use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_rights_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use senior_rights::config::AppConfig;
use senior_rights::error::AppError;
use senior_rights::rights::RightsAnalysisEngine;
use senior_rights::telemetry;
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

    info!(
        current_tax_rate = %config.estimation.current_tax_rate,
        current_tax_default = %config.estimation.current_tax_default,
        "estimation policy loaded"
    );
    let engine = Arc::new(RightsAnalysisEngine::new(config.estimation.clone()));

    let app = with_rights_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "senior rights service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
