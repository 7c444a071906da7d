//! Mock upstream sources
//!
//! Two tiny servers that stand in for the advertising platform and the CRM
//! during local runs. Every path answers `GET` with a fixed envelope.
//!
//! ```text
//!   mock-ads :3001 ──► {"external":{"ads":{"performance":[..]}}}
//!   mock-crm :3002 ──► {"external":{"crm":{"opportunities":[..]}}}
//! ```

pub mod fixtures;

use std::net::SocketAddr;

use axum::{routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

pub const ADS_PORT: u16 = 3001;
pub const CRM_PORT: u16 = 3002;

/// Ads source: every GET returns the performance fixture.
pub fn ads_router() -> Router {
    let handler = || async { Json(fixtures::ads_payload()) };
    Router::new()
        .route("/", get(handler))
        .route("/{*path}", get(handler))
        .layer(CorsLayer::permissive())
}

/// CRM source: every GET returns the opportunity fixture stamped with the
/// request time.
pub fn crm_router() -> Router {
    let handler = || async { Json(fixtures::crm_payload(chrono::Utc::now())) };
    Router::new()
        .route("/", get(handler))
        .route("/{*path}", get(handler))
        .layer(CorsLayer::permissive())
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Bind `0.0.0.0:port` and serve until Ctrl-C.
pub async fn serve(name: &str, port: u16, router: Router) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, source = name, "Mock source listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    tracing::info!(source = name, "Mock source stopped");
    Ok(())
}
