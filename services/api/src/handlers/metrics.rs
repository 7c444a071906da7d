use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use metrics_store::MetricsFilter;
use std::collections::HashMap;
use types::metric::MetricRow;

pub async fn metrics_by_channel(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<MetricRow>> {
    let filter = MetricsFilter::channel_from_params(&params);
    Json(state.store.query_by_channel(&filter))
}

pub async fn metrics_by_funnel(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<MetricRow>> {
    let filter = MetricsFilter::funnel_from_params(&params);
    Json(state.store.query_by_funnel(&filter))
}
