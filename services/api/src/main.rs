use api::config::{ApiConfig, LogFormat};
use api::{create_router, AppState};
use metrics_store::MemoryStore;
use pipeline::{HttpFetcher, Ingestor};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(config: &ApiConfig) {
    let filter = config
        .log_level
        .as_deref()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutting down server...");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = ApiConfig::from_env();
    init_tracing(&config);
    config.log_defaults();

    tracing::info!(
        ads_url = %config.sources.ads,
        crm_url = %config.sources.crm,
        max_attempts = config.fetch.max_attempts,
        "Starting funnel metrics API"
    );

    let fetcher = Arc::new(HttpFetcher::new(config.fetch.clone())?);
    let store = Arc::new(MemoryStore::new());
    let ingestor = Ingestor::new(fetcher, store.clone(), config.sources.clone());
    let state = AppState::new(store, ingestor);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
