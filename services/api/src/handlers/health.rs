use crate::models::StatusResponse;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn healthz() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy".to_string(),
        rows: None,
    })
}

pub async fn readyz(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ready".to_string(),
        rows: Some(state.store.len()),
    })
}
