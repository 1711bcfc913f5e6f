use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ProfileEdit, ProfileUpdate};
use super::store::{ProfileError, ProfileStore};
use crate::discovery::{CandidateId, SessionUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OpenProfileRequest {
    #[serde(flatten)]
    user: SessionUser,
    #[serde(default)]
    email: Option<String>,
}

/// Router builder for the signed-in student's profile.
pub fn profile_router(store: Arc<ProfileStore>) -> Router {
    Router::new()
        .route("/api/v1/profiles", post(open_handler))
        .route(
            "/api/v1/profiles/:user_id",
            get(profile_handler).patch(update_handler),
        )
        .route("/api/v1/profiles/:user_id/edits", post(edit_handler))
        .route("/api/v1/profiles/:user_id/candidate", get(candidate_handler))
        .with_state(store)
}

async fn open_handler(
    State(store): State<Arc<ProfileStore>>,
    Json(request): Json<OpenProfileRequest>,
) -> Response {
    match store.open(&request.user, request.email) {
        Ok((profile, true)) => (StatusCode::CREATED, Json(profile)).into_response(),
        Ok((profile, false)) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn profile_handler(
    State(store): State<Arc<ProfileStore>>,
    Path(user_id): Path<String>,
) -> Response {
    match store.get(&CandidateId(user_id)) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn update_handler(
    State(store): State<Arc<ProfileStore>>,
    Path(user_id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    match store.update(&CandidateId(user_id), update) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn edit_handler(
    State(store): State<Arc<ProfileStore>>,
    Path(user_id): Path<String>,
    Json(edit): Json<ProfileEdit>,
) -> Response {
    match store.edit(&CandidateId(user_id), edit) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn candidate_handler(
    State(store): State<Arc<ProfileStore>>,
    Path(user_id): Path<String>,
) -> Response {
    match store.get(&CandidateId(user_id)) {
        Ok(profile) => (StatusCode::OK, Json(profile.to_candidate())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ProfileError) -> Response {
    let status = error.status_code();
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
