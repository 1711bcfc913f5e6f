use crate::cli::ServeArgs;
use crate::infra::{load_directory, seed_connections, AppState, InMemoryConnectionRegistry};
use crate::routes::with_discovery_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use study_buddy::config::AppConfig;
use study_buddy::discovery::BuddyDiscoveryService;
use study_buddy::error::AppError;
use study_buddy::profile::ProfileStore;
use study_buddy::telemetry;
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

    let directory = Arc::new(load_directory(config.directory.roster_csv.as_deref())?);
    let registry = Arc::new(InMemoryConnectionRegistry::seeded(seed_connections()));
    let candidates = directory.len();
    let discovery_service = Arc::new(BuddyDiscoveryService::new(directory, registry));

    let profiles = Arc::new(ProfileStore::new());

    let app = with_discovery_routes(discovery_service, profiles)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, candidates, "study buddy discovery service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
