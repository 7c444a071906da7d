use metrics_store::MetricsStore;
use pipeline::Ingestor;
use std::sync::Arc;

/// Shared handles for all handlers.
///
/// The store is created once at startup and lives for the whole process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MetricsStore>,
    pub ingestor: Arc<Ingestor>,
}

impl AppState {
    pub fn new(store: Arc<dyn MetricsStore>, ingestor: Ingestor) -> Self {
        Self {
            store,
            ingestor: Arc::new(ingestor),
        }
    }
}
