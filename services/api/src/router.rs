use crate::handlers::{health, ingest, metrics};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ingest/run", post(ingest::run_ingestion))
        .route("/metrics/channel", get(metrics::metrics_by_channel))
        .route("/metrics/funnel", get(metrics::metrics_by_funnel))
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
