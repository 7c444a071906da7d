use mock_sources::{crm_router, init_tracing, serve, CRM_PORT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    serve("crm", CRM_PORT, crm_router()).await
}
