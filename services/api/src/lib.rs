//! HTTP surface for the funnel metrics service
//!
//! Routes:
//! - `POST /ingest/run` runs one ingestion batch
//! - `GET /metrics/channel` and `GET /metrics/funnel` query stored rows
//! - `GET /healthz` and `GET /readyz` report liveness and readiness

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;

pub use config::ApiConfig;
pub use router::create_router;
pub use state::AppState;
