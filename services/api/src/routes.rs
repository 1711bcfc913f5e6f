use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use study_buddy::connections::ConnectionRegistry;
use study_buddy::directory::{BuddyDirectory, StaticDirectory};
use study_buddy::discovery::{
    apply_filters, discovery_router, BuddyDiscoveryService, Candidate, FilterCriteria,
};
use study_buddy::error::AppError;
use study_buddy::profile::{profile_router, ProfileStore};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewRequest {
    #[serde(default)]
    pub(crate) criteria: FilterCriteria,
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewResponse {
    pub(crate) data_source: RosterSource,
    pub(crate) total_candidates: usize,
    pub(crate) active_filters: usize,
    pub(crate) matches: Vec<Candidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RosterSource {
    Csv,
    Sample,
}

pub(crate) fn with_discovery_routes<D, C>(
    service: Arc<BuddyDiscoveryService<D, C>>,
    profiles: Arc<ProfileStore>,
) -> axum::Router
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    discovery_router(service)
        .merge(profile_router(profiles))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/discovery/preview",
            axum::routing::post(preview_endpoint),
        )
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

/// One-shot filtering without a session, against the sample roster or an uploaded CSV.
pub(crate) async fn preview_endpoint(
    Json(payload): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let PreviewRequest {
        criteria,
        roster_csv,
    } = payload;

    let (directory, data_source) = if let Some(csv) = roster_csv {
        let reader = Cursor::new(csv.into_bytes());
        (StaticDirectory::from_csv_reader(reader)?, RosterSource::Csv)
    } else {
        (StaticDirectory::sample(), RosterSource::Sample)
    };

    let candidates = directory.candidates()?;
    let matches = apply_filters(&candidates, &criteria)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(PreviewResponse {
        data_source,
        total_candidates: candidates.len(),
        active_filters: criteria.active_filter_count(),
        matches,
    }))
}
