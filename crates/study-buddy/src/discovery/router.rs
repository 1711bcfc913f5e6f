use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;

use super::criteria::CriteriaUpdate;
use super::domain::{CandidateId, SessionUser};
use super::service::{BuddyDiscoveryService, DiscoveryServiceError, SessionId};
use crate::connections::ConnectionRegistry;
use crate::directory::BuddyDirectory;

/// Router builder exposing HTTP endpoints for buddy discovery.
pub fn discovery_router<D, C>(service: Arc<BuddyDiscoveryService<D, C>>) -> Router
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    Router::new()
        .route("/api/v1/discovery/facets", get(facets_handler::<D, C>))
        .route("/api/v1/discovery/sessions", post(open_handler::<D, C>))
        .route(
            "/api/v1/discovery/sessions/:session_id",
            delete(close_handler::<D, C>),
        )
        .route(
            "/api/v1/discovery/sessions/:session_id/matches",
            get(matches_handler::<D, C>),
        )
        .route(
            "/api/v1/discovery/sessions/:session_id/criteria",
            post(criteria_handler::<D, C>),
        )
        .route(
            "/api/v1/discovery/sessions/:session_id/requests/:candidate_id",
            post(request_handler::<D, C>),
        )
        .with_state(service)
}

pub(crate) async fn facets_handler<D, C>(
    State(service): State<Arc<BuddyDiscoveryService<D, C>>>,
) -> Response
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    match service.facets() {
        Ok(catalog) => (StatusCode::OK, axum::Json(catalog)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_handler<D, C>(
    State(service): State<Arc<BuddyDiscoveryService<D, C>>>,
    axum::Json(user): axum::Json<SessionUser>,
) -> Response
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    match service.open_session(user) {
        Ok(session_id) => {
            let payload = json!({ "sessionId": session_id });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

/// Discarding a session drops its criteria and request flags.
pub(crate) async fn close_handler<D, C>(
    State(service): State<Arc<BuddyDiscoveryService<D, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    match service.close_session(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn matches_handler<D, C>(
    State(service): State<Arc<BuddyDiscoveryService<D, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    match service.search(&SessionId(session_id)) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn criteria_handler<D, C>(
    State(service): State<Arc<BuddyDiscoveryService<D, C>>>,
    Path(session_id): Path<String>,
    axum::Json(update): axum::Json<CriteriaUpdate>,
) -> Response
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    match service.update_criteria(&SessionId(session_id), update) {
        Ok(criteria) => {
            let payload = json!({
                "criteria": criteria,
                "activeFilters": criteria.active_filter_count(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn request_handler<D, C>(
    State(service): State<Arc<BuddyDiscoveryService<D, C>>>,
    Path((session_id, candidate_id)): Path<(String, String)>,
) -> Response
where
    D: BuddyDirectory + 'static,
    C: ConnectionRegistry + 'static,
{
    match service.send_request(&SessionId(session_id), &CandidateId(candidate_id)) {
        Ok(outcome) => (StatusCode::ACCEPTED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: DiscoveryServiceError) -> Response {
    let status = error.status_code();
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
