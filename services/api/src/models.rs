use serde::{Deserialize, Serialize};
use types::ids::BatchId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub count: usize,
    pub batch_id: BatchId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}
