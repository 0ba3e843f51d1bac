use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use vote_right_server::build_router;
use vote_right_server::config::load_config;
use vote_right_server::core::error::AppError;
use vote_right_server::core::http_client::build_http_client;
use vote_right_server::features::candidates::CandidateService;
use vote_right_server::features::civic::{CivicClient, CivicDataSource};
use vote_right_server::features::enrichment::{EnrichmentService, EnrichmentStrategy, build_strategy};
use vote_right_server::server::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let config = load_config()?;
    let http_client = build_http_client(config.http.disable_proxy, config.http.timeout_secs)
        .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;

    let civic: Arc<dyn CivicDataSource> =
        Arc::new(CivicClient::new(config.civic.clone(), http_client.clone()));
    let strategy = build_strategy(&config, http_client).await?;
    tracing::info!(
        strategy = %strategy.kind(),
        quota = config.enrichment.max_enriched_officials,
        "enrichment configured"
    );

    let enrichment = Arc::new(EnrichmentService::new(config.enrichment.clone(), strategy));
    let candidates = Arc::new(CandidateService::new(civic, enrichment));
    let app = build_router(AppState::new(candidates));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "starting server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::internal(format!("failed to bind: {err}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
