use mock_sources::{ads_router, init_tracing, serve, ADS_PORT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    serve("ads", ADS_PORT, ads_router()).await
}
