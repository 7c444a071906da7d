use crate::error::AppError;
use crate::models::IngestResponse;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::collections::HashMap;
use types::calendar::parse_day;

pub async fn run_ingestion(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<IngestResponse>, AppError> {
    // Absent or empty `since` means no lower bound; anything else must be a calendar day.
    let since = match params.get("since").map(String::as_str) {
        None | Some("") => None,
        Some(raw) => match parse_day(raw) {
            Some(day) => Some(day),
            None => {
                tracing::warn!(since = raw, "Invalid since parameter");
                return Err(AppError::BadRequest(
                    "Invalid since parameter format. Use YYYY-MM-DD".into(),
                ));
            }
        },
    };

    let report = state.ingestor.run(since).await?;

    Ok(Json(IngestResponse {
        message: "Data ingestion completed successfully".to_string(),
        count: report.count,
        batch_id: report.batch_id,
    }))
}
